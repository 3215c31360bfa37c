pub mod callback;
pub mod health;
pub mod signatures;
pub mod signers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use paraph_blob::DocumentStore;
use paraph_gateway::CallbackProcessor;
use paraph_provider::DynEnvelopeClient;
use paraph_state::SignatureRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The callback processing pipeline.
    pub processor: Arc<CallbackProcessor>,
    /// Signature persistence backend.
    pub repository: Arc<dyn SignatureRepository>,
    /// Document blob storage backend.
    pub documents: Arc<dyn DocumentStore>,
    /// E-signature provider client.
    pub provider: Arc<dyn DynEnvelopeClient>,
    /// URL the provider posts status notifications to.
    pub callback_url: String,
    /// URL the signer is redirected to after a signing session.
    pub return_url: String,
}

/// Build the Axum router with all API routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/v1/callback", post(callback::callback))
        .route(
            "/v1/signatures",
            get(signatures::list_signatures).post(signatures::create_signature),
        )
        .route("/v1/signatures/{id}", get(signatures::get_signature))
        .route(
            "/v1/signatures/{id}/document",
            get(signatures::download_document),
        )
        .route(
            "/v1/signers/{client_user_id}/view",
            get(signers::recipient_view),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
