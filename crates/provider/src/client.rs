use async_trait::async_trait;
use bytes::Bytes;

use paraph_core::EnvelopeId;

use crate::error::ProviderError;
use crate::types::{CreateEnvelopeRequest, EnvelopeDocument, RecipientViewRequest};

/// Strongly-typed e-signature provider client with native `async fn`.
///
/// This trait is **not** object-safe because it uses native `async fn`
/// methods (which desugar to opaque `impl Future` return types). If you need
/// dynamic dispatch, use [`DynEnvelopeClient`] instead -- every
/// `EnvelopeClient` automatically implements `DynEnvelopeClient` via a
/// blanket implementation.
pub trait EnvelopeClient: Send + Sync {
    /// Returns the unique name of this provider client.
    fn name(&self) -> &str;

    /// Create a remote envelope and send the signing request. Returns the
    /// backend-assigned envelope id.
    fn create_envelope(
        &self,
        request: &CreateEnvelopeRequest,
    ) -> impl std::future::Future<Output = Result<EnvelopeId, ProviderError>> + Send;

    /// List the documents attached to an envelope, in provider order.
    fn list_documents(
        &self,
        envelope_id: &EnvelopeId,
    ) -> impl std::future::Future<Output = Result<Vec<EnvelopeDocument>, ProviderError>> + Send;

    /// Fetch the content of one envelope document.
    fn fetch_document(
        &self,
        envelope_id: &EnvelopeId,
        document_id: &str,
    ) -> impl std::future::Future<Output = Result<Bytes, ProviderError>> + Send;

    /// Mint a provider-hosted signing session URL for a signer.
    fn recipient_view_url(
        &self,
        request: &RecipientViewRequest,
    ) -> impl std::future::Future<Output = Result<String, ProviderError>> + Send;

    /// Perform a health check to verify the provider is reachable.
    fn health_check(&self) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;
}

/// Object-safe client trait for use behind `Arc<dyn DynEnvelopeClient>`.
///
/// Uses [`macro@async_trait`] to enable dynamic dispatch of async methods.
/// You generally should not implement this trait directly -- instead
/// implement [`EnvelopeClient`] and rely on the blanket implementation.
#[async_trait]
pub trait DynEnvelopeClient: Send + Sync {
    /// Returns the unique name of this provider client.
    fn name(&self) -> &str;

    /// Create a remote envelope and send the signing request.
    async fn create_envelope(
        &self,
        request: &CreateEnvelopeRequest,
    ) -> Result<EnvelopeId, ProviderError>;

    /// List the documents attached to an envelope, in provider order.
    async fn list_documents(
        &self,
        envelope_id: &EnvelopeId,
    ) -> Result<Vec<EnvelopeDocument>, ProviderError>;

    /// Fetch the content of one envelope document.
    async fn fetch_document(
        &self,
        envelope_id: &EnvelopeId,
        document_id: &str,
    ) -> Result<Bytes, ProviderError>;

    /// Mint a provider-hosted signing session URL for a signer.
    async fn recipient_view_url(
        &self,
        request: &RecipientViewRequest,
    ) -> Result<String, ProviderError>;

    /// Perform a health check to verify the provider is reachable.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Blanket implementation: any type that implements [`EnvelopeClient`] also
/// implements [`DynEnvelopeClient`], bridging the static and dynamic
/// dispatch worlds.
#[async_trait]
impl<T: EnvelopeClient + Sync> DynEnvelopeClient for T {
    fn name(&self) -> &str {
        EnvelopeClient::name(self)
    }

    async fn create_envelope(
        &self,
        request: &CreateEnvelopeRequest,
    ) -> Result<EnvelopeId, ProviderError> {
        EnvelopeClient::create_envelope(self, request).await
    }

    async fn list_documents(
        &self,
        envelope_id: &EnvelopeId,
    ) -> Result<Vec<EnvelopeDocument>, ProviderError> {
        EnvelopeClient::list_documents(self, envelope_id).await
    }

    async fn fetch_document(
        &self,
        envelope_id: &EnvelopeId,
        document_id: &str,
    ) -> Result<Bytes, ProviderError> {
        EnvelopeClient::fetch_document(self, envelope_id, document_id).await
    }

    async fn recipient_view_url(
        &self,
        request: &RecipientViewRequest,
    ) -> Result<String, ProviderError> {
        EnvelopeClient::recipient_view_url(self, request).await
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        EnvelopeClient::health_check(self).await
    }
}
