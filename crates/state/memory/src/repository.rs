use async_trait::async_trait;
use dashmap::DashMap;

use paraph_core::{ClientUserId, DocumentRef, EnvelopeId, Signature, SignatureId, Signer};
use paraph_state::error::RepositoryError;
use paraph_state::repository::SignatureRepository;

/// In-memory [`SignatureRepository`] backed by [`DashMap`]s.
///
/// Signatures are keyed by local id, with a secondary index from envelope id
/// to local id for callback correlation. Suitable for tests and the default
/// single-process deployment.
#[derive(Debug, Default)]
pub struct MemorySignatureRepository {
    by_id: DashMap<String, Signature>,
    by_envelope: DashMap<String, String>,
}

impl MemorySignatureRepository {
    /// Create a new, empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignatureRepository for MemorySignatureRepository {
    async fn insert(&self, signature: Signature) -> Result<(), RepositoryError> {
        let envelope_key = signature.envelope_id.as_str().to_owned();

        // Use the `entry` API for atomicity: claim the envelope index slot
        // first, then store the record.
        match self.by_envelope.entry(envelope_key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(
                RepositoryError::DuplicateEnvelope(signature.envelope_id.to_string()),
            ),
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(signature.id.as_str().to_owned());
                self.by_id
                    .insert(signature.id.as_str().to_owned(), signature);
                Ok(())
            }
        }
    }

    async fn get(&self, id: &SignatureId) -> Result<Option<Signature>, RepositoryError> {
        Ok(self.by_id.get(id.as_str()).map(|entry| entry.clone()))
    }

    async fn find_by_envelope_id(
        &self,
        envelope_id: &EnvelopeId,
    ) -> Result<Option<Signature>, RepositoryError> {
        let Some(signature_id) = self.by_envelope.get(envelope_id.as_str()) else {
            return Ok(None);
        };
        Ok(self.by_id.get(signature_id.value()).map(|entry| entry.clone()))
    }

    async fn find_by_client_user_id(
        &self,
        client_user_id: &ClientUserId,
    ) -> Result<Option<Signature>, RepositoryError> {
        // Full scan; acceptable for the in-memory backend.
        Ok(self
            .by_id
            .iter()
            .find(|entry| entry.signer_by_client_user_id(client_user_id).is_some())
            .map(|entry| entry.clone()))
    }

    async fn update_signer(
        &self,
        signature_id: &SignatureId,
        signer: &Signer,
    ) -> Result<(), RepositoryError> {
        let mut entry = self
            .by_id
            .get_mut(signature_id.as_str())
            .ok_or_else(|| RepositoryError::NotFound(signature_id.to_string()))?;

        let stored = entry
            .signers
            .iter_mut()
            .find(|s| s.id == signer.id)
            .ok_or_else(|| RepositoryError::NotFound(signer.id.to_string()))?;
        *stored = signer.clone();
        Ok(())
    }

    async fn update_document(
        &self,
        signature_id: &SignatureId,
        document: &DocumentRef,
    ) -> Result<(), RepositoryError> {
        let mut entry = self
            .by_id
            .get_mut(signature_id.as_str())
            .ok_or_else(|| RepositoryError::NotFound(signature_id.to_string()))?;
        entry.document = document.clone();
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Signature>, RepositoryError> {
        let mut signatures: Vec<Signature> =
            self.by_id.iter().map(|entry| entry.clone()).collect();
        signatures.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        signatures.truncate(limit);
        Ok(signatures)
    }
}
