/// Configuration for the DocuSign client.
#[derive(Debug, Clone)]
pub struct DocuSignConfig {
    /// OAuth access token used to authenticate API requests.
    pub access_token: String,

    /// DocuSign API account id the envelopes are created under.
    pub account_id: String,

    /// Base URL for the eSignature REST API. Override this for testing
    /// against a mock server, or for production accounts
    /// (`https://na3.docusign.net/restapi/v2.1`).
    pub base_url: String,
}

impl DocuSignConfig {
    /// Create a new configuration with the given token and account.
    ///
    /// Uses the demo environment base URL
    /// (`https://demo.docusign.net/restapi/v2.1`).
    pub fn new(access_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            account_id: account_id.into(),
            base_url: "https://demo.docusign.net/restapi/v2.1".to_owned(),
        }
    }

    /// Override the API base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}
