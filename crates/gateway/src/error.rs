use thiserror::Error;

/// Errors that abort callback processing before any mutation is persisted.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// The notification body could not be parsed, or a required field was
    /// absent or empty.
    #[error("malformed notification: {0}")]
    MalformedNotification(String),

    /// The reported status is outside the accepted vocabulary.
    #[error("unknown status: {0}")]
    UnknownStatus(String),

    /// No local signature matches the reported envelope id.
    #[error("unknown envelope: {0}")]
    UnknownEnvelope(String),

    /// No signer in the resolved signature matches the reported
    /// client-user id.
    #[error("unknown signer: {0}")]
    UnknownSigner(String),

    /// The repository failed while resolving or persisting records.
    #[error("repository error: {0}")]
    Repository(#[from] paraph_state::RepositoryError),

    /// The gateway was misconfigured (e.g. missing required collaborators).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<paraph_core::InvalidStatus> for CallbackError {
    fn from(err: paraph_core::InvalidStatus) -> Self {
        Self::UnknownStatus(err.0)
    }
}

/// A failure while retrieving or storing the signed document.
///
/// Non-fatal relative to the already-committed status mutation: the remote
/// envelope truly is complete, so the `Completed` transition stands and this
/// error is surfaced alongside it for later reconciliation.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The envelope reported no documents to retrieve.
    #[error("envelope has no documents: {0}")]
    NoDocuments(String),

    /// The provider failed to list or deliver the document.
    #[error("document retrieval failed: {0}")]
    Retrieval(#[from] paraph_provider::ProviderError),

    /// The fetched document could not be stored.
    #[error("document storage failed: {0}")]
    Storage(#[from] paraph_blob::BlobError),

    /// The replacement document reference could not be persisted.
    #[error("document reference update failed: {0}")]
    Repository(paraph_state::RepositoryError),
}
