use thiserror::Error;

/// Errors from signature repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("signature not found: {0}")]
    NotFound(String),

    #[error("duplicate envelope id: {0}")]
    DuplicateEnvelope(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),
}
