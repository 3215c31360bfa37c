use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use paraph_core::{DocumentRef, Signature, SignatureId, Signer};
use paraph_provider::{CreateEnvelopeRequest, EnvelopeSigner};

use crate::error::ServerError;

use super::AppState;

/// Request body for `POST /v1/signatures`.
#[derive(Debug, Deserialize)]
pub struct CreateSignatureRequest {
    /// Logical filename the document is stored under.
    pub filename: String,
    /// MIME content type of the document.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Base64-encoded document content.
    pub content_base64: String,
    /// The single signer on this signature request.
    pub signer: NewSigner,
    /// Subject line of the signing request email.
    pub email_subject: Option<String>,
}

/// A signer in a create-signature request.
#[derive(Debug, Deserialize)]
pub struct NewSigner {
    /// Full name presented in the signing UI.
    pub full_name: String,
    /// Email the signing request is delivered to.
    pub email: String,
}

fn default_content_type() -> String {
    "application/pdf".to_owned()
}

/// Query parameters for `GET /v1/signatures`.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    /// Maximum number of signatures to return, newest first.
    pub limit: Option<usize>,
}

/// `POST /v1/signatures` -- create a signature request.
///
/// Stores the uploaded document, creates the remote envelope (registering
/// the callback URL), and records the local signature. Returns the created
/// record, whose signer's `client_user_id` is the handle for the recipient
/// view endpoint.
pub async fn create_signature(
    State(state): State<AppState>,
    Json(request): Json<CreateSignatureRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let data = BASE64
        .decode(request.content_base64.as_bytes())
        .map_err(|e| ServerError::BadRequest(format!("invalid base64 document content: {e}")))?;
    let data = Bytes::from(data);
    if data.is_empty() {
        return Err(ServerError::BadRequest("document content is empty".into()));
    }

    let signer = Signer::new(&request.signer.full_name, &request.signer.email);
    let email_subject = request
        .email_subject
        .clone()
        .unwrap_or_else(|| format!("Please sign {}", request.filename));

    // Create the remote envelope first: if the provider rejects the request
    // nothing is recorded locally.
    let envelope_id = state
        .provider
        .create_envelope(&CreateEnvelopeRequest {
            email_subject,
            document_name: request.filename.clone(),
            document: data.clone(),
            signer: EnvelopeSigner {
                client_user_id: signer.client_user_id.clone(),
                full_name: signer.full_name.clone(),
                email: signer.email.clone(),
            },
            callback_url: state.callback_url.clone(),
        })
        .await?;

    let signature_id = SignatureId::generate();
    let stored = state
        .documents
        .put(
            &signature_id,
            &request.filename,
            &request.content_type,
            data,
        )
        .await?;

    let signature = Signature {
        id: signature_id,
        envelope_id,
        document: DocumentRef {
            filename: stored.filename,
            content_type: stored.content_type,
            size_bytes: stored.size_bytes,
            checksum_sha256: stored.checksum_sha256,
            updated_at: stored.updated_at,
        },
        signers: vec![signer],
        created_at: Utc::now(),
    };
    state.repository.insert(signature.clone()).await?;

    info!(
        signature_id = %signature.id,
        envelope_id = %signature.envelope_id,
        "signature request created"
    );
    Ok((StatusCode::CREATED, Json(signature)))
}

/// `GET /v1/signatures` -- list signature requests, newest first.
pub async fn list_signatures(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let limit = query.limit.unwrap_or(20).min(100);
    let signatures = state.repository.list_recent(limit).await?;
    Ok((StatusCode::OK, Json(signatures)))
}

/// `GET /v1/signatures/{id}` -- fetch one signature request.
pub async fn get_signature(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let signature = state
        .repository
        .get(&SignatureId::new(&id))
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("no signature with id {id}")))?;
    Ok((StatusCode::OK, Json(signature)))
}

/// `GET /v1/signatures/{id}/document` -- download the current document.
///
/// Serves the original upload until a `completed` callback replaces it with
/// the signed version; the logical filename never changes.
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let signature_id = SignatureId::new(&id);
    let signature = state
        .repository
        .get(&signature_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("no signature with id {id}")))?;

    let (metadata, data) = state
        .documents
        .get(&signature_id, &signature.document.filename)
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!(
                "no stored document for signature {id} ({})",
                signature.document.filename
            ))
        })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, metadata.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", metadata.filename),
            ),
        ],
        data,
    ))
}
