//! Storage abstraction trait
//!
//! Defines the `Storage` trait every blob backend must implement, so the
//! lifecycle service can coordinate blob writes and metadata records without
//! coupling to filesystem details.

use async_trait::async_trait;
use coffre_core::AppError;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Result of a successful blob write.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// Generated, collision-resistant name.
    pub file_name: String,
    /// Key to address the blob with on later operations.
    pub key: String,
    /// Bytes actually written.
    pub size: u64,
}

/// Blob storage abstraction.
///
/// `store` generates the blob's unique name; callers never pick names. A
/// `delete` of a missing key fails with [`StorageError::NotFound`] so the
/// caller decides whether that is fatal.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a blob and return its generated name, key, and size.
    async fn store(&self, original_filename: &str, data: Vec<u8>) -> StorageResult<StoredBlob>;

    /// Delete a blob by key.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Root directory blobs are served from.
    fn base_path(&self) -> &Path;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_not_found_converts_to_app_not_found() {
        let err: AppError = StorageError::NotFound("1700000000-42.txt".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn storage_failures_convert_to_500_class() {
        let err: AppError = StorageError::UploadFailed("disk full".to_string()).into();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn invalid_key_converts_to_400_class() {
        let err: AppError = StorageError::InvalidKey("../etc/passwd".to_string()).into();
        assert_eq!(err.http_status_code(), 400);
    }
}
