//! Store trait abstractions
//!
//! Minimal interfaces the auth flow and file lifecycle need from the two
//! persistent stores, allowing tests to run without a database.

use async_trait::async_trait;
use coffre_core::models::{StoredFile, User};
use coffre_core::AppError;
use uuid::Uuid;

/// Credential store operations needed by the auth flow.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email. The lookup is case-sensitive.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Total number of user records.
    async fn count(&self) -> Result<i64, AppError>;
}

/// File metadata store operations needed by the lifecycle manager.
#[async_trait]
pub trait FileMetadataStore: Send + Sync {
    /// Persist a new metadata record.
    async fn insert(&self, file: &StoredFile) -> Result<(), AppError>;

    /// Fetch a record by id.
    async fn get(&self, id: Uuid) -> Result<Option<StoredFile>, AppError>;

    /// All records, most recently uploaded first.
    async fn list_recent(&self) -> Result<Vec<StoredFile>, AppError>;

    /// Delete a record by id; `NotFound` if no such record exists.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Total number of file records.
    async fn count(&self) -> Result<i64, AppError>;
}
