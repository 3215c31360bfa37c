use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::SignerStatus;
use crate::types::{ClientUserId, SignerId};

/// A recipient of a signature request.
///
/// Owned by exactly one [`Signature`](crate::Signature). The status fields
/// are mutated by callback processing only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signer {
    /// Local signer identifier.
    pub id: SignerId,
    /// Full name presented to the provider.
    pub full_name: String,
    /// Email the provider delivers the signing request to.
    pub email: String,
    /// Client-assigned id used to correlate provider callbacks.
    pub client_user_id: ClientUserId,
    /// Current lifecycle state.
    #[serde(default)]
    pub status: SignerStatus,
    /// When the current status was reported.
    pub status_at: Option<DateTime<Utc>>,
    /// Free-text detail for the current status (decline reason).
    pub status_detail: Option<String>,
}

impl Signer {
    /// Create a signer in the initial `Created` state.
    ///
    /// The client-user id defaults to the generated signer id, so a fresh
    /// signer is immediately correlatable.
    #[must_use]
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        let id = SignerId::generate();
        let client_user_id = ClientUserId::new(id.as_str());
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
            client_user_id,
            status: SignerStatus::Created,
            status_at: None,
            status_detail: None,
        }
    }

    /// Apply a callback-reported status.
    ///
    /// The previous state is overwritten unconditionally; there is no guard
    /// against regressing (e.g. `sent` arriving after `completed`), matching
    /// the provider's unconditional-overwrite semantics. Any previous status
    /// detail is cleared; `declined` callers attach the decline reason via
    /// [`Signer::set_status_detail`].
    pub fn apply_status(&mut self, status: SignerStatus, at: DateTime<Utc>) {
        self.status = status;
        self.status_at = Some(at);
        self.status_detail = None;
    }

    /// Attach free-text detail to the current status.
    pub fn set_status_detail(&mut self, detail: impl Into<String>) {
        self.status_detail = Some(detail.into());
    }
}
