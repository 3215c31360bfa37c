use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use paraph_blob::DocumentStore;
use paraph_core::{DocumentRef, Signature, Signer, SignerStatus};
use paraph_provider::DynEnvelopeClient;
use paraph_state::SignatureRepository;

use crate::error::{CallbackError, DocumentError};
use crate::notification::parse_notification;

/// Result of processing one provider notification.
///
/// Carries the resolved records so the caller can render an acknowledgement.
/// `document_error` is set when a `completed` notification updated the
/// signer but the signed-document retrieval failed afterwards; the status
/// mutation is already committed and authoritative in that case.
#[derive(Debug)]
pub struct ProcessingOutcome {
    /// The signature the notification resolved to, after mutation.
    pub signature: Signature,
    /// The signer the notification resolved to, after mutation.
    pub signer: Signer,
    /// The status that was applied.
    pub status: SignerStatus,
    /// Non-fatal document retrieval failure, for later reconciliation.
    pub document_error: Option<DocumentError>,
}

impl ProcessingOutcome {
    /// Returns `true` if the status was applied but the document could not
    /// be retrieved.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.document_error.is_some()
    }
}

/// Processes provider status notifications against local records.
///
/// One notification is fully processed per call: parse, resolve, validate,
/// mutate, persist. The processor holds no per-request state and is safe to
/// share behind an `Arc`; callers are responsible for not processing two
/// notifications for the same signer concurrently (the provider's
/// at-least-once redelivery makes reprocessing safe, not parallelism).
pub struct CallbackProcessor {
    repository: Arc<dyn SignatureRepository>,
    provider: Arc<dyn DynEnvelopeClient>,
    documents: Arc<dyn DocumentStore>,
}

impl fmt::Debug for CallbackProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackProcessor")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

impl CallbackProcessor {
    /// Start building a processor.
    #[must_use]
    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::new()
    }

    /// Process one raw notification body.
    ///
    /// Fails without persisting anything when the body is malformed, the
    /// status is out of vocabulary, or the envelope/signer cannot be
    /// resolved. A document retrieval failure after a `completed` status
    /// write is reported through [`ProcessingOutcome::document_error`]
    /// instead, since the status mutation has already been committed.
    #[instrument(skip_all, fields(provider = %self.provider.name()))]
    pub async fn process(&self, raw_body: &[u8]) -> Result<ProcessingOutcome, CallbackError> {
        let notification = parse_notification(raw_body)?;
        let status = notification.status()?;

        let mut signature = self
            .repository
            .find_by_envelope_id(&notification.envelope_id)
            .await?
            .ok_or_else(|| CallbackError::UnknownEnvelope(notification.envelope_id.to_string()))?;

        let signer = signature
            .signer_by_client_user_id_mut(&notification.client_user_id)
            .ok_or_else(|| CallbackError::UnknownSigner(notification.client_user_id.to_string()))?;

        signer.apply_status(status, Utc::now());
        if status == SignerStatus::Declined {
            // A missing reason is stored as empty text, not treated as an error.
            signer.set_status_detail(notification.decline_reason.clone().unwrap_or_default());
        }
        let signer = signer.clone();

        self.repository
            .update_signer(&signature.id, &signer)
            .await?;

        info!(
            envelope_id = %notification.envelope_id,
            client_user_id = %notification.client_user_id,
            %status,
            "signer status updated"
        );

        // The status write above is authoritative; a failed retrieval is a
        // partial success, reconciled on the provider's next redelivery or
        // by an operator.
        let mut document_error = None;
        if status == SignerStatus::Completed {
            match self.replace_document(&signature).await {
                Ok(document) => signature.document = document,
                Err(e) => {
                    warn!(
                        envelope_id = %notification.envelope_id,
                        error = %e,
                        "signed document retrieval failed; signer remains completed"
                    );
                    document_error = Some(e);
                }
            }
        }

        Ok(ProcessingOutcome {
            signature,
            signer,
            status,
            document_error,
        })
    }

    /// Retrieve the signed document and store it under the signature's
    /// original logical filename.
    ///
    /// Single-document policy: the first entry of the envelope's document
    /// list is fetched; additional documents (e.g. the provider's summary
    /// certificate) are ignored.
    async fn replace_document(
        &self,
        signature: &Signature,
    ) -> Result<DocumentRef, DocumentError> {
        let envelope_id = &signature.envelope_id;

        let documents = self.provider.list_documents(envelope_id).await?;
        let first = documents
            .first()
            .ok_or_else(|| DocumentError::NoDocuments(envelope_id.to_string()))?;

        debug!(%envelope_id, document_id = %first.document_id, "fetching signed document");
        let data = self
            .provider
            .fetch_document(envelope_id, &first.document_id)
            .await?;

        let stored = self
            .documents
            .replace(&signature.id, &signature.document.filename, data)
            .await?;

        let document = DocumentRef {
            filename: stored.filename,
            content_type: stored.content_type,
            size_bytes: stored.size_bytes,
            checksum_sha256: stored.checksum_sha256,
            updated_at: stored.updated_at,
        };

        self.repository
            .update_document(&signature.id, &document)
            .await
            .map_err(DocumentError::Repository)?;

        info!(%envelope_id, size_bytes = document.size_bytes, "signed document stored");
        Ok(document)
    }
}

/// Fluent builder for constructing a [`CallbackProcessor`].
///
/// All three collaborators are required; [`ProcessorBuilder::build`] fails
/// with a configuration error when one is missing.
#[derive(Default)]
pub struct ProcessorBuilder {
    repository: Option<Arc<dyn SignatureRepository>>,
    provider: Option<Arc<dyn DynEnvelopeClient>>,
    documents: Option<Arc<dyn DocumentStore>>,
}

impl ProcessorBuilder {
    /// Create a new builder with no collaborators set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signature repository.
    #[must_use]
    pub fn repository(mut self, repository: Arc<dyn SignatureRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the provider client.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn DynEnvelopeClient>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the document store.
    #[must_use]
    pub fn documents(mut self, documents: Arc<dyn DocumentStore>) -> Self {
        self.documents = Some(documents);
        self
    }

    /// Build the processor.
    pub fn build(self) -> Result<CallbackProcessor, CallbackError> {
        Ok(CallbackProcessor {
            repository: self
                .repository
                .ok_or_else(|| CallbackError::Configuration("repository is required".into()))?,
            provider: self
                .provider
                .ok_or_else(|| CallbackError::Configuration("provider client is required".into()))?,
            documents: self
                .documents
                .ok_or_else(|| CallbackError::Configuration("document store is required".into()))?,
        })
    }
}
