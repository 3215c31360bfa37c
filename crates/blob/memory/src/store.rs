use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;

use paraph_blob::error::BlobError;
use paraph_blob::store::DocumentStore;
use paraph_blob::types::{StoredDocument, sha256_hex};
use paraph_core::SignatureId;

/// A single entry in the in-memory store.
#[derive(Debug, Clone)]
struct Entry {
    metadata: StoredDocument,
    data: Bytes,
}

/// In-memory [`DocumentStore`] backed by a [`DashMap`].
///
/// Blobs are keyed by `{signature_id}/{filename}`. Suitable for tests and
/// the default single-process deployment.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    data: DashMap<String, Entry>,
}

impl MemoryDocumentStore {
    /// Create a new, empty in-memory document store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn render_key(signature_id: &SignatureId, filename: &str) -> String {
        format!("{signature_id}/{filename}")
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(
        &self,
        signature_id: &SignatureId,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredDocument, BlobError> {
        let now = Utc::now();
        let metadata = StoredDocument {
            filename: filename.to_owned(),
            content_type: content_type.to_owned(),
            size_bytes: data.len() as u64,
            checksum_sha256: sha256_hex(&data),
            created_at: now,
            updated_at: now,
        };
        self.data.insert(
            Self::render_key(signature_id, filename),
            Entry {
                metadata: metadata.clone(),
                data,
            },
        );
        Ok(metadata)
    }

    async fn get(
        &self,
        signature_id: &SignatureId,
        filename: &str,
    ) -> Result<Option<(StoredDocument, Bytes)>, BlobError> {
        Ok(self
            .data
            .get(&Self::render_key(signature_id, filename))
            .map(|entry| (entry.metadata.clone(), entry.data.clone())))
    }

    async fn replace(
        &self,
        signature_id: &SignatureId,
        filename: &str,
        data: Bytes,
    ) -> Result<StoredDocument, BlobError> {
        let key = Self::render_key(signature_id, filename);
        let mut entry = self
            .data
            .get_mut(&key)
            .ok_or_else(|| BlobError::NotFound(key.clone()))?;

        entry.metadata.size_bytes = data.len() as u64;
        entry.metadata.checksum_sha256 = sha256_hex(&data);
        entry.metadata.updated_at = Utc::now();
        entry.data = data;
        Ok(entry.metadata.clone())
    }

    async fn delete(
        &self,
        signature_id: &SignatureId,
        filename: &str,
    ) -> Result<bool, BlobError> {
        Ok(self
            .data
            .remove(&Self::render_key(signature_id, filename))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_and_get() {
        let store = MemoryDocumentStore::new();
        let id = SignatureId::new("sig-1");

        let metadata = store
            .put(&id, "contract.pdf", "application/pdf", Bytes::from("abc"))
            .await
            .unwrap();
        assert_eq!(metadata.size_bytes, 3);

        let (stored, data) = store.get(&id, "contract.pdf").await.unwrap().unwrap();
        assert_eq!(data, Bytes::from("abc"));
        assert_eq!(stored.checksum_sha256, sha256_hex(b"abc"));
    }

    #[tokio::test]
    async fn replace_keeps_name_and_content_type() {
        let store = MemoryDocumentStore::new();
        let id = SignatureId::new("sig-1");
        store
            .put(&id, "contract.pdf", "application/pdf", Bytes::from("draft"))
            .await
            .unwrap();

        let metadata = store
            .replace(&id, "contract.pdf", Bytes::from("PDF-CONTENT"))
            .await
            .unwrap();
        assert_eq!(metadata.filename, "contract.pdf");
        assert_eq!(metadata.content_type, "application/pdf");
        assert_eq!(metadata.size_bytes, 11);

        let (_, data) = store.get(&id, "contract.pdf").await.unwrap().unwrap();
        assert_eq!(data, Bytes::from("PDF-CONTENT"));
    }

    #[tokio::test]
    async fn replace_missing_blob_fails() {
        let store = MemoryDocumentStore::new();
        let err = store
            .replace(&SignatureId::new("sig-1"), "ghost.pdf", Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BlobError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = MemoryDocumentStore::new();
        let id = SignatureId::new("sig-1");
        store
            .put(&id, "contract.pdf", "application/pdf", Bytes::from("x"))
            .await
            .unwrap();

        assert!(store.delete(&id, "contract.pdf").await.unwrap());
        assert!(!store.delete(&id, "contract.pdf").await.unwrap());
    }
}
