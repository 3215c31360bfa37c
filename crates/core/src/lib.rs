pub mod notification;
pub mod signature;
pub mod signer;
pub mod status;
pub mod types;

pub use notification::Notification;
pub use signature::{DocumentRef, Signature};
pub use signer::Signer;
pub use status::{InvalidStatus, SignerStatus};
pub use types::{ClientUserId, EnvelopeId, SignatureId, SignerId};
