//! Structural extraction of provider status notifications.
//!
//! The provider posts a `Connect`-style XML body. Only four fields matter:
//! the envelope id, the recipient status, the recipient's client-user id,
//! and (for declines) the decline reason. The extractor walks the element
//! tree by path rather than by attribute presence, so a missing field is an
//! explicit [`CallbackError::MalformedNotification`] instead of a silent
//! `None` deep in a chain.

use quick_xml::Reader;
use quick_xml::events::Event;

use paraph_core::{ClientUserId, EnvelopeId, Notification};

use crate::error::CallbackError;

/// Fields collected during the single pass over the body.
#[derive(Debug, Default)]
struct Extracted {
    envelope_id: Option<String>,
    status: Option<String>,
    client_user_id: Option<String>,
    decline_reason: Option<String>,
}

/// Parse a provider notification body.
///
/// Tolerant of surrounding whitespace and of sibling elements the schema
/// does not mention. Only the first `RecipientStatus` block is read: Paraph
/// envelopes carry a single signer, and the provider lists the notification
/// subject first. The envelope-level `EnvelopeStatus/Status` element is
/// deliberately not consulted; the recipient status drives the signer
/// lifecycle.
pub fn parse_notification(body: &[u8]) -> Result<Notification, CallbackError> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    // Path of element local names from the root to the current position.
    let mut path: Vec<String> = Vec::new();
    // Depth of the RecipientStatus block being read, if inside one.
    let mut recipient_depth: Option<usize> = None;
    let mut recipient_seen = false;
    let mut extracted = Extracted::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                path.push(name);

                if recipient_depth.is_none()
                    && !recipient_seen
                    && path_ends_with(&path, &["RecipientStatuses", "RecipientStatus"])
                {
                    recipient_depth = Some(path.len());
                    recipient_seen = true;
                }
            }
            Ok(Event::End(_)) => {
                if recipient_depth == Some(path.len()) {
                    recipient_depth = None;
                }
                path.pop();
            }
            Ok(Event::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|e| CallbackError::MalformedNotification(e.to_string()))?
                    .into_owned();
                assign(&mut extracted, &path, recipient_depth, value);
            }
            Ok(Event::CData(cdata)) => {
                let value = String::from_utf8_lossy(&cdata).into_owned();
                assign(&mut extracted, &path, recipient_depth, value);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(CallbackError::MalformedNotification(e.to_string()));
            }
        }
        buf.clear();
    }

    let envelope_id = required(extracted.envelope_id, "EnvelopeStatus.EnvelopeID")?;
    let raw_status = required(
        extracted.status,
        "EnvelopeStatus.RecipientStatuses.RecipientStatus.Status",
    )?;
    let client_user_id = required(
        extracted.client_user_id,
        "EnvelopeStatus.RecipientStatuses.RecipientStatus.ClientUserId",
    )?;

    Ok(Notification {
        envelope_id: EnvelopeId::new(envelope_id),
        client_user_id: ClientUserId::new(client_user_id),
        raw_status,
        decline_reason: extracted.decline_reason,
    })
}

/// Route a text value to the field its element path addresses, if any.
fn assign(
    extracted: &mut Extracted,
    path: &[String],
    recipient_depth: Option<usize>,
    value: String,
) {
    // Direct children of the first RecipientStatus block.
    if let Some(depth) = recipient_depth {
        if path.len() == depth + 1 {
            match path[depth].as_str() {
                "Status" => set_once(&mut extracted.status, value),
                "ClientUserId" => set_once(&mut extracted.client_user_id, value),
                "DeclineReason" => set_once(&mut extracted.decline_reason, value),
                _ => {}
            }
        }
        return;
    }

    // EnvelopeID directly under EnvelopeStatus (not inside a recipient).
    if path_ends_with(path, &["EnvelopeStatus", "EnvelopeID"]) {
        set_once(&mut extracted.envelope_id, value);
    }
}

fn set_once(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn path_ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a == b)
}

fn required(value: Option<String>, field: &str) -> Result<String, CallbackError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CallbackError::MalformedNotification(format!(
            "missing required field {field}"
        ))),
    }
}
