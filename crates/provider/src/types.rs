use bytes::Bytes;
use serde::{Deserialize, Serialize};

use paraph_core::{ClientUserId, EnvelopeId};

/// One document entry in an envelope's document list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeDocument {
    /// Provider-assigned document id within the envelope.
    pub document_id: String,
    /// Display name of the document.
    pub name: String,
}

/// The signer registered on a new envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeSigner {
    /// Client-assigned id used to correlate callbacks and recipient views.
    pub client_user_id: ClientUserId,
    /// Full name presented in the signing UI.
    pub full_name: String,
    /// Email the signing request is delivered to.
    pub email: String,
}

/// Request to create a remote envelope for a signature request.
#[derive(Debug, Clone)]
pub struct CreateEnvelopeRequest {
    /// Subject line of the signing request email.
    pub email_subject: String,
    /// Filename of the attached document.
    pub document_name: String,
    /// Raw document content.
    pub document: Bytes,
    /// The single signer on this envelope.
    pub signer: EnvelopeSigner,
    /// URL the provider posts status notifications to.
    pub callback_url: String,
}

/// Request for a provider-hosted signing session URL.
#[derive(Debug, Clone)]
pub struct RecipientViewRequest {
    /// Envelope the signer belongs to.
    pub envelope_id: EnvelopeId,
    /// The signer requesting the view.
    pub signer: EnvelopeSigner,
    /// URL the signer is redirected to after signing.
    pub return_url: String,
}
