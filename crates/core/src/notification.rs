use crate::status::{InvalidStatus, SignerStatus};
use crate::types::{ClientUserId, EnvelopeId};

/// A provider status notification, parsed from one callback body.
///
/// Transient: used only within a single processing call, never persisted.
/// The `status` field carries the raw reported string; [`Notification::status`]
/// validates it against the callback vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Envelope the notification refers to.
    pub envelope_id: EnvelopeId,
    /// Client-user id of the recipient the status applies to.
    pub client_user_id: ClientUserId,
    /// Raw recipient status string as reported by the provider.
    pub raw_status: String,
    /// Decline reason, present only on `declined` notifications.
    pub decline_reason: Option<String>,
}

impl Notification {
    /// Validate the raw status against the callback vocabulary.
    pub fn status(&self) -> Result<SignerStatus, InvalidStatus> {
        self.raw_status.parse()
    }
}
