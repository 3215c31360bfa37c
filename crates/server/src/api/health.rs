use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;

/// `GET /health` -- returns service status and provider reachability.
///
/// The provider probe is informational: an unreachable provider does not
/// make the service unhealthy, since callback processing of already-created
/// envelopes can still partially succeed.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let provider = match state.provider.health_check().await {
        Ok(()) => "ok",
        Err(_) => "unreachable",
    };

    let body = serde_json::json!({
        "status": "ok",
        "provider": {
            "name": state.provider.name(),
            "status": provider,
        },
    });
    (StatusCode::OK, Json(body))
}
