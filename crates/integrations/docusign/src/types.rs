use serde::{Deserialize, Serialize};

// ─── POST /envelopes ─────────────────────────────────────────────────

/// Request body for envelope creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDefinition {
    /// Subject line of the signing request email.
    pub email_subject: String,
    /// `"sent"` to dispatch the signing request immediately.
    pub status: String,
    /// Attached documents.
    pub documents: Vec<DocumentDefinition>,
    /// Envelope recipients.
    pub recipients: RecipientsDefinition,
    /// Connect-style status callback configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_notification: Option<EventNotification>,
}

/// One document attached to an envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    /// Base64-encoded document content.
    pub document_base64: String,
    /// Display name of the document.
    pub name: String,
    /// Id of the document within the envelope.
    pub document_id: String,
}

/// Recipient groups on an envelope. Only signers are used here.
#[derive(Debug, Clone, Serialize)]
pub struct RecipientsDefinition {
    /// The signing recipients.
    pub signers: Vec<SignerDefinition>,
}

/// One signing recipient.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerDefinition {
    /// Email the signing request is delivered to.
    pub email: String,
    /// Full name presented in the signing UI.
    pub name: String,
    /// Id of the recipient within the envelope.
    pub recipient_id: String,
    /// Client-assigned id; marks the recipient as embedded/captive and is
    /// echoed back in status callbacks.
    pub client_user_id: String,
}

/// Envelope-level callback registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventNotification {
    /// URL the provider posts status notifications to.
    pub url: String,
    /// Recipient lifecycle events to notify on.
    pub recipient_events: Vec<EnvelopeEvent>,
    /// Whether to include provider-side logging.
    pub logging_enabled: String,
}

/// One subscribed event kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeEvent {
    /// Event code, e.g. `"Sent"` or `"Completed"`.
    pub recipient_event_status_code: String,
}

impl EventNotification {
    /// Subscribe to the four recipient lifecycle events Paraph processes.
    #[must_use]
    pub fn for_callback_url(url: impl Into<String>) -> Self {
        let recipient_events = ["Sent", "Delivered", "Completed", "Declined"]
            .into_iter()
            .map(|code| EnvelopeEvent {
                recipient_event_status_code: code.to_owned(),
            })
            .collect();
        Self {
            url: url.into(),
            recipient_events,
            logging_enabled: "true".to_owned(),
        }
    }
}

// ─── API Responses ───────────────────────────────────────────────────

/// Response from envelope creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnvelopeResponse {
    /// The backend-assigned envelope id.
    pub envelope_id: Option<String>,
    /// Envelope status after creation.
    pub status: Option<String>,
}

/// Response from the envelope document list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDocumentsResponse {
    /// Documents attached to the envelope, in provider order.
    #[serde(default)]
    pub envelope_documents: Vec<EnvelopeDocumentEntry>,
}

/// One entry in the envelope document list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDocumentEntry {
    /// Id of the document within the envelope.
    pub document_id: String,
    /// Display name of the document.
    #[serde(default)]
    pub name: String,
}

/// Response from the recipient view endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientViewResponse {
    /// The one-time signing session URL.
    pub url: String,
}

/// Error body returned by the eSignature API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error_code: Option<String>,
    /// Human-readable message.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_definition_serializes_camel_case() {
        let definition = EnvelopeDefinition {
            email_subject: "Please sign".into(),
            status: "sent".into(),
            documents: vec![DocumentDefinition {
                document_base64: "UERGLUNPTlRFTlQ=".into(),
                name: "contract.pdf".into(),
                document_id: "1".into(),
            }],
            recipients: RecipientsDefinition {
                signers: vec![SignerDefinition {
                    email: "ada@example.com".into(),
                    name: "Ada Lovelace".into(),
                    recipient_id: "1".into(),
                    client_user_id: "signer-1".into(),
                }],
            },
            event_notification: Some(EventNotification::for_callback_url(
                "https://app.example.com/v1/callback",
            )),
        };

        let json = serde_json::to_value(&definition).unwrap();
        assert_eq!(json["emailSubject"], "Please sign");
        assert_eq!(json["documents"][0]["documentBase64"], "UERGLUNPTlRFTlQ=");
        assert_eq!(json["recipients"]["signers"][0]["clientUserId"], "signer-1");
        assert_eq!(
            json["eventNotification"]["recipientEvents"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn documents_response_deserializes() {
        let response: EnvelopeDocumentsResponse = serde_json::from_str(
            r#"{"envelopeDocuments": [
                {"documentId": "1", "name": "contract.pdf"},
                {"documentId": "certificate", "name": "Summary"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.envelope_documents.len(), 2);
        assert_eq!(response.envelope_documents[0].document_id, "1");
    }

    #[test]
    fn documents_response_tolerates_missing_list() {
        let response: EnvelopeDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.envelope_documents.is_empty());
    }
}
