pub mod client;
pub mod error;
pub mod types;

pub use client::{DynEnvelopeClient, EnvelopeClient};
pub use error::ProviderError;
pub use types::{CreateEnvelopeRequest, EnvelopeDocument, EnvelopeSigner, RecipientViewRequest};
