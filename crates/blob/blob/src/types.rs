use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata for a stored document blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Logical filename the blob is stored under, stable across replacement.
    pub filename: String,
    /// MIME content type (e.g. `"application/pdf"`).
    pub content_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// `SHA-256` hex digest of the blob content.
    pub checksum_sha256: String,
    /// When the blob was first stored.
    pub created_at: DateTime<Utc>,
    /// When the blob content was last written.
    pub updated_at: DateTime<Utc>,
}

/// `SHA-256` hex digest of a byte slice.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn metadata_serde_roundtrip() {
        let doc = StoredDocument {
            filename: "contract.pdf".into(),
            content_type: "application/pdf".into(),
            size_bytes: 3,
            checksum_sha256: sha256_hex(b"abc"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: StoredDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.checksum_sha256, doc.checksum_sha256);
    }
}
