use base64::Engine;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use paraph_core::EnvelopeId;
use paraph_provider::{
    CreateEnvelopeRequest, EnvelopeClient, EnvelopeDocument, ProviderError, RecipientViewRequest,
};

use crate::config::DocuSignConfig;
use crate::error::DocuSignError;
use crate::types::{
    ApiErrorResponse, CreateEnvelopeResponse, DocumentDefinition, EnvelopeDefinition,
    EnvelopeDocumentsResponse, EventNotification, RecipientViewResponse, RecipientsDefinition,
    SignerDefinition,
};

/// DocuSign client backed by the eSignature REST API.
///
/// Implements the [`EnvelopeClient`] trait so it can be injected into the
/// callback processor and the server API.
pub struct DocuSignClient {
    config: DocuSignConfig,
    client: Client,
}

impl DocuSignClient {
    /// Create a new client with the given configuration.
    ///
    /// Uses a default `reqwest::Client` with a 30 second timeout; provider
    /// calls are blocking network calls and must stay bounded.
    pub fn new(config: DocuSignConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new client with a custom HTTP client.
    ///
    /// Useful for testing or for sharing a connection pool.
    pub fn with_client(config: DocuSignConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Build the full URL for an account-scoped API path.
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/accounts/{}/{path}",
            self.config.base_url, self.config.account_id
        )
    }

    /// Triage a non-success response into a [`DocuSignError`].
    async fn api_error(response: reqwest::Response) -> DocuSignError {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("DocuSign API rate limit hit");
            return DocuSignError::RateLimited;
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return DocuSignError::NotFound(format!("HTTP {status}"));
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(err) => DocuSignError::Api(format!(
                "{}: {}",
                err.error_code.unwrap_or_else(|| status.to_string()),
                err.message.unwrap_or_default()
            )),
            Err(_) => DocuSignError::Api(format!("HTTP {status}: {body}")),
        }
    }
}

impl EnvelopeClient for DocuSignClient {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "docusign"
    }

    async fn create_envelope(
        &self,
        request: &CreateEnvelopeRequest,
    ) -> Result<EnvelopeId, ProviderError> {
        let definition = EnvelopeDefinition {
            email_subject: request.email_subject.clone(),
            status: "sent".to_owned(),
            documents: vec![DocumentDefinition {
                document_base64: base64::engine::general_purpose::STANDARD
                    .encode(&request.document),
                name: request.document_name.clone(),
                document_id: "1".to_owned(),
            }],
            recipients: RecipientsDefinition {
                signers: vec![SignerDefinition {
                    email: request.signer.email.clone(),
                    name: request.signer.full_name.clone(),
                    recipient_id: "1".to_owned(),
                    client_user_id: request.signer.client_user_id.to_string(),
                }],
            },
            event_notification: Some(EventNotification::for_callback_url(&request.callback_url)),
        };

        debug!(document = %request.document_name, "creating DocuSign envelope");

        let response = self
            .client
            .post(self.api_url("envelopes"))
            .bearer_auth(&self.config.access_token)
            .json(&definition)
            .send()
            .await
            .map_err(DocuSignError::Http)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await.into());
        }

        let created: CreateEnvelopeResponse =
            response.json().await.map_err(DocuSignError::Http)?;
        let envelope_id = created.envelope_id.ok_or_else(|| {
            DocuSignError::UnexpectedResponse("envelope created without envelopeId".into())
        })?;

        Ok(EnvelopeId::new(envelope_id))
    }

    async fn list_documents(
        &self,
        envelope_id: &EnvelopeId,
    ) -> Result<Vec<EnvelopeDocument>, ProviderError> {
        let response = self
            .client
            .get(self.api_url(&format!("envelopes/{envelope_id}/documents")))
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(DocuSignError::Http)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await.into());
        }

        let listing: EnvelopeDocumentsResponse =
            response.json().await.map_err(DocuSignError::Http)?;

        Ok(listing
            .envelope_documents
            .into_iter()
            .map(|entry| EnvelopeDocument {
                document_id: entry.document_id,
                name: entry.name,
            })
            .collect())
    }

    async fn fetch_document(
        &self,
        envelope_id: &EnvelopeId,
        document_id: &str,
    ) -> Result<Bytes, ProviderError> {
        debug!(%envelope_id, document_id, "fetching envelope document");

        let response = self
            .client
            .get(self.api_url(&format!("envelopes/{envelope_id}/documents/{document_id}")))
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(DocuSignError::Http)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await.into());
        }

        Ok(response.bytes().await.map_err(DocuSignError::Http)?)
    }

    async fn recipient_view_url(
        &self,
        request: &RecipientViewRequest,
    ) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "returnUrl": request.return_url,
            "authenticationMethod": "none",
            "email": request.signer.email,
            "userName": request.signer.full_name,
            "clientUserId": request.signer.client_user_id,
        });

        let response = self
            .client
            .post(self.api_url(&format!(
                "envelopes/{}/views/recipient",
                request.envelope_id
            )))
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(DocuSignError::Http)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await.into());
        }

        let view: RecipientViewResponse = response.json().await.map_err(DocuSignError::Http)?;
        Ok(view.url)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        // The account endpoint is the cheapest authenticated call.
        let url = format!(
            "{}/accounts/{}",
            self.config.base_url, self.config.account_id
        );
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(DocuSignError::Http)?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await.into());
        }
        Ok(())
    }
}
