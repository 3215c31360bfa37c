use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::signer::Signer;
use crate::types::{ClientUserId, EnvelopeId, SignatureId};

/// Reference to the document blob attached to a signature request.
///
/// The logical `filename` is stable for the lifetime of the signature: when
/// the signed document replaces the original upload, it is stored under the
/// same name and only the metadata here changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Stable logical filename the blob is stored under.
    pub filename: String,
    /// MIME content type (e.g. `"application/pdf"`).
    pub content_type: String,
    /// Size of the currently stored blob in bytes.
    pub size_bytes: u64,
    /// `SHA-256` hex digest of the currently stored blob.
    pub checksum_sha256: String,
    /// When the blob was last written.
    pub updated_at: DateTime<Utc>,
}

/// A signature request: one envelope on the provider side, one document and
/// its signers on ours.
///
/// The envelope id is assigned once at creation and never changes; the
/// document reference is replaced at most once, when a `completed` callback
/// is processed. Signatures are never deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    /// Local signature identifier.
    pub id: SignatureId,
    /// Backend envelope id correlating provider callbacks.
    pub envelope_id: EnvelopeId,
    /// The attached document.
    pub document: DocumentRef,
    /// Recipients of this signature request.
    pub signers: Vec<Signer>,
    /// When the signature request was created.
    pub created_at: DateTime<Utc>,
}

impl Signature {
    /// Create a signature request with a fresh local id.
    #[must_use]
    pub fn new(envelope_id: EnvelopeId, document: DocumentRef, signers: Vec<Signer>) -> Self {
        Self {
            id: SignatureId::generate(),
            envelope_id,
            document,
            signers,
            created_at: Utc::now(),
        }
    }

    /// Find the signer matching a callback's client-user id.
    #[must_use]
    pub fn signer_by_client_user_id(&self, id: &ClientUserId) -> Option<&Signer> {
        self.signers.iter().find(|s| &s.client_user_id == id)
    }

    /// Mutable variant of [`Signature::signer_by_client_user_id`].
    pub fn signer_by_client_user_id_mut(&mut self, id: &ClientUserId) -> Option<&mut Signer> {
        self.signers.iter_mut().find(|s| &s.client_user_id == id)
    }
}
