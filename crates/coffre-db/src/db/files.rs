//! File metadata repository: CRUD for the files table.

use crate::traits::FileMetadataStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coffre_core::models::StoredFile;
use coffre_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Row type for the files table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    file_name: String,
    storage_key: String,
    original_filename: String,
    size_bytes: i64,
    owner_id: Option<Uuid>,
    uploaded_at: DateTime<Utc>,
}

impl FileRow {
    fn into_stored_file(self) -> StoredFile {
        StoredFile {
            id: self.id,
            file_name: self.file_name,
            storage_key: self.storage_key,
            original_filename: self.original_filename,
            size: self.size_bytes,
            owner_id: self.owner_id,
            uploaded_at: self.uploaded_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "id, file_name, storage_key, original_filename, size_bytes, owner_id, uploaded_at";

/// Repository for the files table.
#[derive(Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new metadata record.
    #[tracing::instrument(skip(self, file), fields(db.table = "files", db.record_id = %file.id))]
    pub async fn insert(&self, file: &StoredFile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO files (id, file_name, storage_key, original_filename, size_bytes, owner_id, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(file.id)
        .bind(&file.file_name)
        .bind(&file.storage_key)
        .bind(&file.original_filename)
        .bind(file.size)
        .bind(file.owner_id)
        .bind(file.uploaded_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fetch a record by id.
    #[tracing::instrument(skip(self), fields(db.table = "files", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<StoredFile>, AppError> {
        let row: Option<FileRow> = sqlx::query_as::<Postgres, FileRow>(&format!(
            "SELECT {} FROM files WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(FileRow::into_stored_file))
    }

    /// All records ordered by upload time, most recent first.
    #[tracing::instrument(skip(self), fields(db.table = "files"))]
    pub async fn list_recent(&self) -> Result<Vec<StoredFile>, AppError> {
        let rows: Vec<FileRow> = sqlx::query_as::<Postgres, FileRow>(&format!(
            "SELECT {} FROM files ORDER BY uploaded_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(FileRow::into_stored_file).collect())
    }

    /// Delete a record by id; `NotFound` if it does not exist.
    #[tracing::instrument(skip(self), fields(db.table = "files", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("File not found".to_string()));
        }
        Ok(())
    }

    /// Count file records.
    #[tracing::instrument(skip(self), fields(db.table = "files"))]
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl FileMetadataStore for FileRepository {
    async fn insert(&self, file: &StoredFile) -> Result<(), AppError> {
        FileRepository::insert(self, file).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredFile>, AppError> {
        FileRepository::get(self, id).await
    }

    async fn list_recent(&self) -> Result<Vec<StoredFile>, AppError> {
        FileRepository::list_recent(self).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        FileRepository::delete(self, id).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        FileRepository::count(self).await
    }
}
