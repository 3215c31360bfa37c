use async_trait::async_trait;
use bytes::Bytes;

use paraph_core::SignatureId;

use crate::error::BlobError;
use crate::types::StoredDocument;

/// Pluggable blob storage backend for signature documents.
///
/// Blobs are addressed by owning signature and logical filename. The
/// filename is stable for the lifetime of the signature: replacing the
/// document on completion writes new content under the same name.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new blob and return its metadata.
    ///
    /// The store computes the size and `SHA-256` checksum. Overwrites any
    /// existing blob under the same name.
    async fn put(
        &self,
        signature_id: &SignatureId,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredDocument, BlobError>;

    /// Retrieve a blob, returning both metadata and content.
    ///
    /// Returns `None` if no blob is stored under the name.
    async fn get(
        &self,
        signature_id: &SignatureId,
        filename: &str,
    ) -> Result<Option<(StoredDocument, Bytes)>, BlobError>;

    /// Replace the content of an existing blob under the same logical name.
    ///
    /// The previous content is discarded and the metadata (size, checksum,
    /// `updated_at`) recomputed in one step; the content type is retained.
    /// Fails with [`BlobError::NotFound`] if no blob exists under the name;
    /// replacement never creates a document that was not uploaded first.
    async fn replace(
        &self,
        signature_id: &SignatureId,
        filename: &str,
        data: Bytes,
    ) -> Result<StoredDocument, BlobError>;

    /// Delete a blob. Returns `true` if it existed.
    async fn delete(&self, signature_id: &SignatureId, filename: &str)
    -> Result<bool, BlobError>;
}
