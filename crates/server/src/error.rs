use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use paraph_gateway::CallbackError;
use paraph_state::RepositoryError;

/// Errors that can occur when running the Paraph server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body or parameters were invalid.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A callback-processing error surfaced through the API.
    #[error(transparent)]
    Callback(#[from] CallbackError),

    /// A repository error surfaced through the API.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A document store error surfaced through the API.
    #[error("document store error: {0}")]
    Blob(#[from] paraph_blob::BlobError),

    /// A provider error surfaced through the API.
    #[error("provider error: {0}")]
    Provider(#[from] paraph_provider::ProviderError),
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Callback(e) => match e {
                CallbackError::MalformedNotification(_) | CallbackError::UnknownStatus(_) => {
                    StatusCode::BAD_REQUEST
                }
                CallbackError::UnknownEnvelope(_) | CallbackError::UnknownSigner(_) => {
                    StatusCode::NOT_FOUND
                }
                CallbackError::Repository(_) | CallbackError::Configuration(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Repository(RepositoryError::DuplicateEnvelope(_)) => StatusCode::CONFLICT,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Io(_) | Self::Repository(_) | Self::Blob(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
