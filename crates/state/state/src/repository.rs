use async_trait::async_trait;

use paraph_core::{ClientUserId, DocumentRef, EnvelopeId, Signature, SignatureId, Signer};

use crate::error::RepositoryError;

/// Trait for persisting signature requests and their signers.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// The envelope id is the only correlation key callbacks carry, so lookups
/// go through it; local ids serve the read API.
#[async_trait]
pub trait SignatureRepository: Send + Sync {
    /// Insert a new signature request.
    ///
    /// Fails with [`RepositoryError::DuplicateEnvelope`] if a signature with
    /// the same envelope id already exists; envelope ids are set once at
    /// creation and unique.
    async fn insert(&self, signature: Signature) -> Result<(), RepositoryError>;

    /// Fetch a signature by its local id. Returns `None` if not found.
    async fn get(&self, id: &SignatureId) -> Result<Option<Signature>, RepositoryError>;

    /// Fetch a signature by its backend envelope id. Returns `None` if no
    /// signature matches.
    async fn find_by_envelope_id(
        &self,
        envelope_id: &EnvelopeId,
    ) -> Result<Option<Signature>, RepositoryError>;

    /// Fetch the signature containing the signer with the given client-user
    /// id. Returns `None` if no signer matches.
    async fn find_by_client_user_id(
        &self,
        client_user_id: &ClientUserId,
    ) -> Result<Option<Signature>, RepositoryError>;

    /// Persist an updated signer within an existing signature.
    ///
    /// The signer is matched by its local id; fails with
    /// [`RepositoryError::NotFound`] if either the signature or the signer
    /// does not exist.
    async fn update_signer(
        &self,
        signature_id: &SignatureId,
        signer: &Signer,
    ) -> Result<(), RepositoryError>;

    /// Persist a replacement document reference for an existing signature.
    async fn update_document(
        &self,
        signature_id: &SignatureId,
        document: &DocumentRef,
    ) -> Result<(), RepositoryError>;

    /// List the most recently created signatures, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Signature>, RepositoryError>;
}
