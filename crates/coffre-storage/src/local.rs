use crate::traits::{Storage, StorageError, StorageResult, StoredBlob};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const MAX_EXTENSION_LEN: usize = 10;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `base_path`.
    ///
    /// Creates the directory if absent; calling this again on an existing
    /// root is a no-op.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a storage key to a filesystem path.
    ///
    /// Keys come back from the metadata store, so they are validated against
    /// path traversal before touching the filesystem.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(key))
    }

    /// Generate a unique blob name: unix-millis, a random disambiguator, and
    /// the original extension. The random component keeps two same-millisecond
    /// uploads from colliding without any locking.
    fn generate_name(original_filename: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let disambiguator: u32 = rand::random();
        let extension = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                e.chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .take(MAX_EXTENSION_LEN)
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|e| !e.is_empty());

        match extension {
            Some(ext) => format!("{}-{}.{}", millis, disambiguator, ext),
            None => format!("{}-{}", millis, disambiguator),
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, original_filename: &str, data: Vec<u8>) -> StorageResult<StoredBlob> {
        let file_name = Self::generate_name(original_filename);
        let path = self.key_to_path(&file_name)?;
        let size = data.len() as u64;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = size,
            "Blob stored"
        );

        Ok(StoredBlob {
            key: file_name.clone(),
            file_name,
            size,
        })
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), key = %key, "Blob deleted");

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn base_path(&self) -> &Path {
        &self.base_path
    }
}
