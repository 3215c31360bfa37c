use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::warn;

use crate::error::ServerError;

use super::AppState;

/// `POST /v1/callback` -- consume one provider status notification.
///
/// The raw body is the provider's XML payload. Malformed bodies and
/// out-of-vocabulary statuses map to 400; unresolvable envelopes or signers
/// map to 404. A `completed` notification whose document retrieval failed
/// still returns 200 -- the status write is committed and authoritative --
/// with the failure surfaced in the response body for reconciliation.
pub async fn callback(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ServerError> {
    let outcome = state.processor.process(&body).await?;

    let mut response = serde_json::json!({
        "signature_id": outcome.signature.id,
        "client_user_id": outcome.signer.client_user_id,
        "status": outcome.status,
    });
    if let Some(ref document_error) = outcome.document_error {
        warn!(
            signature_id = %outcome.signature.id,
            error = %document_error,
            "callback acknowledged with document retrieval failure"
        );
        response["document_error"] = serde_json::json!(document_error.to_string());
    }

    Ok((StatusCode::OK, Json(response)))
}
