//! DocuSign client for the Paraph signature gateway.
//!
//! This crate implements the
//! [`EnvelopeClient`](paraph_provider::EnvelopeClient) trait against the
//! DocuSign eSignature REST API: creating envelopes, listing and fetching
//! envelope documents, and minting embedded recipient-view URLs.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use paraph_docusign::{DocuSignClient, DocuSignConfig};
//!
//! let config = DocuSignConfig::new("your-access-token", "your-account-id");
//! let client = DocuSignClient::new(config);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::DocuSignClient;
pub use config::DocuSignConfig;
pub use error::DocuSignError;
pub use types::{
    CreateEnvelopeResponse, EnvelopeDefinition, EnvelopeDocumentEntry, EnvelopeDocumentsResponse,
    EventNotification, RecipientViewResponse,
};
