use thiserror::Error;

/// Errors that can occur during document blob operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The requested document was not found.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The document exceeds the maximum allowed size.
    #[error("document too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        /// Actual size.
        size: u64,
        /// Maximum allowed size.
        limit: u64,
    },

    /// A storage backend error occurred.
    #[error("document storage error: {0}")]
    Storage(String),
}
