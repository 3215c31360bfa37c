pub mod error;
pub mod store;
pub mod types;

pub use error::BlobError;
pub use store::DocumentStore;
pub use types::{StoredDocument, sha256_hex};
