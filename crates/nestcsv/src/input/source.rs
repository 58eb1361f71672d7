//! Source file loading and metadata.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{NestError, Result};

/// Metadata about a converted source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows read (excluding header).
    pub row_count: usize,
    /// Number of header columns.
    pub column_count: usize,
    /// When the conversion was performed.
    pub converted_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been converted.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            row_count,
            column_count,
            converted_at: Utc::now(),
        }
    }
}

/// A source file read fully into memory.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
    pub hash: String,
    pub size_bytes: u64,
}

impl SourceText {
    /// Read a UTF-8 file and hash its contents.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| NestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let hash = content_hash(&bytes);
        let size_bytes = bytes.len() as u64;

        let text = String::from_utf8(bytes).map_err(|e| NestError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            text,
            hash,
            size_bytes,
        })
    }
}

/// Hash bytes as `sha256:<hex>`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_format() {
        let hash = content_hash(b"abc");
        assert_eq!(
            hash,
            "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_metadata_file_name() {
        let meta = SourceMetadata::new(
            PathBuf::from("/tmp/users.csv"),
            "sha256:00".to_string(),
            10,
            2,
            4,
        );
        assert_eq!(meta.file, "users.csv");
        assert_eq!(meta.row_count, 2);
    }

    #[test]
    fn test_read_missing_file() {
        let err = SourceText::read("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, NestError::Io { .. }));
    }
}
