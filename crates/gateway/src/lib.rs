//! Callback processing pipeline for the Paraph signature gateway.
//!
//! The provider delivers recipient status notifications as XML POST bodies.
//! [`parse_notification`] extracts the correlation fields into a typed
//! [`Notification`](paraph_core::Notification); [`CallbackProcessor`] then
//! resolves the local records, applies the status transition, and, on
//! completion, retrieves the signed document.

pub mod error;
pub mod notification;
pub mod processor;

pub use error::{CallbackError, DocumentError};
pub use notification::parse_notification;
pub use processor::{CallbackProcessor, ProcessingOutcome, ProcessorBuilder};
