use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use paraph_core::ClientUserId;
use paraph_provider::{EnvelopeSigner, RecipientViewRequest};

use crate::error::ServerError;

use super::AppState;

/// Query parameters for the recipient view endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ViewQuery {
    /// Overrides the configured post-signing redirect URL.
    pub return_url: Option<String>,
}

/// `GET /v1/signers/{client_user_id}/view` -- mint a signing session URL.
///
/// Resolves the signer across all signatures by client-user id and asks the
/// provider for a short-lived recipient view URL. The URL expires quickly on
/// the provider side, so callers should redirect immediately.
pub async fn recipient_view(
    State(state): State<AppState>,
    Path(client_user_id): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let client_user_id = ClientUserId::new(&client_user_id);
    let signature = state
        .repository
        .find_by_client_user_id(&client_user_id)
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!("no signer with client user id {client_user_id}"))
        })?;
    let signer = signature
        .signer_by_client_user_id(&client_user_id)
        .ok_or_else(|| {
            ServerError::NotFound(format!("no signer with client user id {client_user_id}"))
        })?;

    let url = state
        .provider
        .recipient_view_url(&RecipientViewRequest {
            envelope_id: signature.envelope_id.clone(),
            signer: EnvelopeSigner {
                client_user_id: signer.client_user_id.clone(),
                full_name: signer.full_name.clone(),
                email: signer.email.clone(),
            },
            return_url: query.return_url.unwrap_or_else(|| state.return_url.clone()),
        })
        .await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "url": url }))))
}
