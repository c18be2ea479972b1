//! File lifecycle: coordinates blob storage and the metadata store.
//!
//! The blob and its metadata record are two independently-failable
//! resources. There is no transaction spanning both: a metadata failure
//! after a blob write leaves the blob orphaned (logged, surfaced to the
//! caller), and a blob already missing at delete time does not block
//! removing the record. Best effort by design.

use coffre_core::models::StoredFile;
use coffre_core::AppError;
use coffre_db::{FileMetadataStore, UserStore};
use coffre_storage::{Storage, StorageError};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Aggregate counts from the two stores.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreStats {
    pub users: i64,
    pub files: i64,
}

/// Coordinates uploads, listing, and removal across blob storage and the
/// metadata store.
pub struct FileLifecycleService {
    files: Arc<dyn FileMetadataStore>,
    users: Arc<dyn UserStore>,
    storage: Arc<dyn Storage>,
}

impl FileLifecycleService {
    pub fn new(
        files: Arc<dyn FileMetadataStore>,
        users: Arc<dyn UserStore>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            files,
            users,
            storage,
        }
    }

    /// Write the blob, then persist its metadata record.
    ///
    /// No rollback on metadata failure: the orphaned blob stays on disk and
    /// the error propagates to the caller.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len(), operation = "upload_file"))]
    pub async fn upload(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        owner_id: Option<Uuid>,
    ) -> Result<StoredFile, AppError> {
        let blob = self.storage.store(original_filename, data).await?;

        let record = StoredFile {
            id: Uuid::new_v4(),
            file_name: blob.file_name,
            storage_key: blob.key,
            original_filename: original_filename.to_string(),
            size: blob.size as i64,
            owner_id,
            uploaded_at: Utc::now(),
        };

        if let Err(e) = self.files.insert(&record).await {
            tracing::error!(
                error = %e,
                storage_key = %record.storage_key,
                "Metadata insert failed after blob write; blob is orphaned"
            );
            return Err(e);
        }

        tracing::info!(
            file_id = %record.id,
            file_name = %record.file_name,
            size_bytes = record.size,
            "File uploaded"
        );

        Ok(record)
    }

    /// All metadata records, most recently uploaded first.
    pub async fn list(&self) -> Result<Vec<StoredFile>, AppError> {
        self.files.list_recent().await
    }

    /// Remove the blob and its metadata record.
    ///
    /// A blob already missing from storage is non-fatal: the record is
    /// removed anyway so the record set converges. Any other storage failure
    /// aborts before the record is touched.
    #[tracing::instrument(skip(self), fields(file_id = %id, operation = "delete_file"))]
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let file = self
            .files
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        match self.storage.delete(&file.storage_key).await {
            Ok(()) => {}
            Err(StorageError::NotFound(key)) => {
                tracing::warn!(
                    storage_key = %key,
                    "Blob already missing; removing metadata record anyway"
                );
            }
            Err(e) => return Err(e.into()),
        }

        self.files.delete(id).await?;

        tracing::info!(file_name = %file.file_name, "File deleted");

        Ok(())
    }

    /// Aggregate counts for the dashboard.
    pub async fn stats(&self) -> Result<StoreStats, AppError> {
        Ok(StoreStats {
            users: self.users.count().await?,
            files: self.files.count().await?,
        })
    }
}
