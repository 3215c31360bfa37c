use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bytes::Bytes;
use tower::ServiceExt;

use paraph_blob::DocumentStore;
use paraph_blob_memory::MemoryDocumentStore;
use paraph_core::{EnvelopeId, SignerStatus};
use paraph_gateway::CallbackProcessor;
use paraph_provider::{
    CreateEnvelopeRequest, DynEnvelopeClient, EnvelopeDocument, ProviderError,
    RecipientViewRequest,
};
use paraph_server::api::AppState;
use paraph_state::SignatureRepository;
use paraph_state_memory::MemorySignatureRepository;

// -- Mock provider --------------------------------------------------------

struct MockClient {
    fail_fetch: bool,
}

impl MockClient {
    fn new() -> Self {
        Self { fail_fetch: false }
    }
}

#[async_trait]
impl DynEnvelopeClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create_envelope(
        &self,
        _request: &CreateEnvelopeRequest,
    ) -> Result<EnvelopeId, ProviderError> {
        Ok(EnvelopeId::new("env-created"))
    }

    async fn list_documents(
        &self,
        _envelope_id: &EnvelopeId,
    ) -> Result<Vec<EnvelopeDocument>, ProviderError> {
        Ok(vec![EnvelopeDocument {
            document_id: "1".into(),
            name: "contract.pdf".into(),
        }])
    }

    async fn fetch_document(
        &self,
        _envelope_id: &EnvelopeId,
        _document_id: &str,
    ) -> Result<Bytes, ProviderError> {
        if self.fail_fetch {
            return Err(ProviderError::Connection("connection reset".into()));
        }
        Ok(Bytes::from_static(b"PDF-CONTENT"))
    }

    async fn recipient_view_url(
        &self,
        request: &RecipientViewRequest,
    ) -> Result<String, ProviderError> {
        Ok(format!(
            "https://sign.example.com/session?return={}",
            request.return_url
        ))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

// -- Helpers --------------------------------------------------------------

struct TestHarness {
    state: AppState,
    repository: Arc<MemorySignatureRepository>,
}

fn build_test_state(client: MockClient) -> TestHarness {
    let repository = Arc::new(MemorySignatureRepository::new());
    let documents = Arc::new(MemoryDocumentStore::new());
    let provider: Arc<dyn DynEnvelopeClient> = Arc::new(client);

    let processor = CallbackProcessor::builder()
        .repository(Arc::clone(&repository) as Arc<dyn SignatureRepository>)
        .provider(Arc::clone(&provider))
        .documents(Arc::clone(&documents) as Arc<dyn DocumentStore>)
        .build()
        .expect("processor should build");

    let state = AppState {
        processor: Arc::new(processor),
        repository: Arc::clone(&repository) as Arc<dyn SignatureRepository>,
        documents: Arc::clone(&documents) as Arc<dyn DocumentStore>,
        provider,
        callback_url: "http://127.0.0.1:8080/v1/callback".to_owned(),
        return_url: "http://127.0.0.1:8080/".to_owned(),
    };

    TestHarness { state, repository }
}

fn build_app(state: AppState) -> axum::Router {
    paraph_server::api::router(state)
}

fn create_request_body() -> serde_json::Value {
    serde_json::json!({
        "filename": "contract.pdf",
        "content_base64": "ZHJhZnQ=",
        "signer": {
            "full_name": "Ada Lovelace",
            "email": "ada@example.com"
        }
    })
}

async fn create_signature(app: &axum::Router) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/signatures")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(create_request_body().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn callback_body(status: &str, envelope_id: &str, client_user_id: &str) -> String {
    format!(
        r"<EnvelopeStatus>
            <EnvelopeID>{envelope_id}</EnvelopeID>
            <RecipientStatuses>
              <RecipientStatus>
                <Status>{status}</Status>
                <ClientUserId>{client_user_id}</ClientUserId>
              </RecipientStatus>
            </RecipientStatuses>
          </EnvelopeStatus>"
    )
}

async fn post_callback(app: &axum::Router, body: String) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/callback")
                .header(header::CONTENT_TYPE, "text/xml")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["provider"]["name"], "mock");
}

#[tokio::test]
async fn create_signature_records_envelope() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);

    let created = create_signature(&app).await;
    assert_eq!(created["envelope_id"], "env-created");
    assert_eq!(created["document"]["filename"], "contract.pdf");
    assert_eq!(created["signers"][0]["status"], "created");

    let stored = harness
        .repository
        .find_by_envelope_id(&EnvelopeId::new("env-created"))
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn create_signature_rejects_bad_base64() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);

    let mut body = create_request_body();
    body["content_base64"] = serde_json::json!("not base64!!!");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/signatures")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_signatures_returns_created() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);
    create_signature(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/signatures?limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_unknown_signature_returns_404() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/signatures/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn callback_sent_updates_signer() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state.clone());
    let created = create_signature(&app).await;
    let client_user_id = created["signers"][0]["client_user_id"].as_str().unwrap();

    let (status, json) =
        post_callback(&app, callback_body("sent", "env-created", client_user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "sent");

    let stored = harness
        .repository
        .find_by_envelope_id(&EnvelopeId::new("env-created"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.signers[0].status, SignerStatus::Sent);
}

#[tokio::test]
async fn callback_completed_replaces_document() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state.clone());
    let created = create_signature(&app).await;
    let client_user_id = created["signers"][0]["client_user_id"].as_str().unwrap();
    let signature_id = created["id"].as_str().unwrap();

    let (status, json) = post_callback(
        &app,
        callback_body("Completed", "env-created", client_user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "completed");
    assert!(json.get("document_error").is_none());

    // The stored blob is now the signed version, under the original name.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/signatures/{signature_id}/document"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"PDF-CONTENT");
}

#[tokio::test]
async fn callback_fetch_failure_still_acknowledged() {
    let harness = build_test_state(MockClient { fail_fetch: true });
    let app = build_app(harness.state.clone());
    let created = create_signature(&app).await;
    let client_user_id = created["signers"][0]["client_user_id"].as_str().unwrap();

    let (status, json) = post_callback(
        &app,
        callback_body("completed", "env-created", client_user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "completed");
    assert!(json["document_error"].is_string());

    let stored = harness
        .repository
        .find_by_envelope_id(&EnvelopeId::new("env-created"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.signers[0].status, SignerStatus::Completed);
}

#[tokio::test]
async fn callback_unknown_envelope_returns_404() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);

    let (status, json) = post_callback(&app, callback_body("sent", "env-ghost", "signer-1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("env-ghost"));
}

#[tokio::test]
async fn callback_malformed_body_returns_400() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);

    let (status, _) = post_callback(&app, "<EnvelopeStatus></EnvelopeStatus>".to_owned()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn callback_unknown_status_returns_400() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);
    let created = create_signature(&app).await;
    let client_user_id = created["signers"][0]["client_user_id"].as_str().unwrap();

    let (status, json) =
        post_callback(&app, callback_body("voided", "env-created", client_user_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("voided"));
}

#[tokio::test]
async fn recipient_view_returns_signing_url() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);
    let created = create_signature(&app).await;
    let client_user_id = created["signers"][0]["client_user_id"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/signers/{client_user_id}/view"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(
        json["url"]
            .as_str()
            .unwrap()
            .starts_with("https://sign.example.com/")
    );
}

#[tokio::test]
async fn recipient_view_unknown_signer_returns_404() {
    let harness = build_test_state(MockClient::new());
    let app = build_app(harness.state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/signers/ghost/view")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
