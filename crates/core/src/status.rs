//! Signer lifecycle states and the callback status vocabulary.
//!
//! The provider reports recipient statuses as free-form strings; only the
//! four values `sent`, `delivered`, `completed` and `declined` are accepted
//! (case-insensitively). Anything else fails to parse, which is the single
//! choke point that keeps out-of-vocabulary statuses out of storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A status string outside the accepted callback vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0}")]
pub struct InvalidStatus(pub String);

/// Lifecycle state of a [`Signer`](crate::Signer).
///
/// `Created` is the initial state of a freshly registered signer; the other
/// four states are driven exclusively by provider callbacks. `Completed` and
/// `Declined` are terminal in intent, but transitions are applied
/// unconditionally; a late or out-of-order callback overwrites whatever
/// state is currently stored, mirroring the provider's own record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerStatus {
    /// Signer registered locally; no callback received yet.
    #[default]
    Created,
    /// The provider sent the signing request to the signer.
    Sent,
    /// The signer opened the signing request.
    Delivered,
    /// The signer signed; the envelope document is final.
    Completed,
    /// The signer refused to sign.
    Declined,
}

impl SignerStatus {
    /// All states reachable from a provider callback, in lifecycle order.
    pub const CALLBACK_STATES: [Self; 4] =
        [Self::Sent, Self::Delivered, Self::Completed, Self::Declined];

    /// Returns `true` for the states intended as terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Declined)
    }

    /// The lowercase wire name of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for SignerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignerStatus {
    type Err = InvalidStatus;

    /// Parse a callback status value.
    ///
    /// Only the four callback states are accepted; `created` is a local
    /// state and is rejected like any other out-of-vocabulary value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            "completed" => Ok(Self::Completed),
            "declined" => Ok(Self::Declined),
            other => Err(InvalidStatus(other.to_owned())),
        }
    }
}
