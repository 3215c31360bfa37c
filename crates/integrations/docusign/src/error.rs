use paraph_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the DocuSign client.
///
/// These are internal errors that get converted into [`ProviderError`] at
/// the public API boundary.
#[derive(Debug, Error)]
pub enum DocuSignError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The DocuSign API returned an error response.
    #[error("DocuSign API error: {0}")]
    Api(String),

    /// The requested envelope or document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API response was missing an expected field.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The client received an HTTP 429 (Too Many Requests) response.
    #[error("rate limited by DocuSign")]
    RateLimited,
}

impl From<DocuSignError> for ProviderError {
    fn from(err: DocuSignError) -> Self {
        match err {
            DocuSignError::Http(e) if e.is_timeout() => {
                ProviderError::Timeout(std::time::Duration::from_secs(30))
            }
            DocuSignError::Http(e) => ProviderError::Connection(e.to_string()),
            DocuSignError::Api(msg) => ProviderError::Api(msg),
            DocuSignError::NotFound(what) => ProviderError::NotFound(what),
            DocuSignError::UnexpectedResponse(msg) => ProviderError::Serialization(msg),
            DocuSignError::RateLimited => ProviderError::RateLimited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_maps_to_retryable() {
        let provider_err: ProviderError = DocuSignError::RateLimited.into();
        assert!(provider_err.is_retryable());
        assert!(matches!(provider_err, ProviderError::RateLimited));
    }

    #[test]
    fn api_error_maps_to_non_retryable() {
        let provider_err: ProviderError = DocuSignError::Api("INVALID_TOKEN_FORMAT".into()).into();
        assert!(!provider_err.is_retryable());
        assert!(matches!(provider_err, ProviderError::Api(_)));
    }

    #[test]
    fn not_found_maps_through() {
        let provider_err: ProviderError = DocuSignError::NotFound("envelope env-1".into()).into();
        assert!(matches!(provider_err, ProviderError::NotFound(_)));
    }

    #[test]
    fn unexpected_response_maps_to_serialization() {
        let provider_err: ProviderError =
            DocuSignError::UnexpectedResponse("missing envelopeId".into()).into();
        assert!(matches!(provider_err, ProviderError::Serialization(_)));
    }
}
