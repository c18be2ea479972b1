//! In-memory store implementations for testing
//!
//! These doubles let the auth flow, lifecycle service, and HTTP layer be
//! exercised without a database.

use crate::traits::{FileMetadataStore, UserStore};
use async_trait::async_trait;
use coffre_core::models::{StoredFile, User};
use coffre_core::AppError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory user store.
#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users
            .lock()
            .unwrap()
            .insert(user.email.clone(), user);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

/// In-memory file metadata store.
#[derive(Clone, Default)]
pub struct MockFileStore {
    files: Arc<Mutex<HashMap<Uuid, StoredFile>>>,
}

impl MockFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileMetadataStore for MockFileStore {
    async fn insert(&self, file: &StoredFile) -> Result<(), AppError> {
        self.files.lock().unwrap().insert(file.id, file.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredFile>, AppError> {
        Ok(self.files.lock().unwrap().get(&id).cloned())
    }

    async fn list_recent(&self) -> Result<Vec<StoredFile>, AppError> {
        let mut files: Vec<StoredFile> = self.files.lock().unwrap().values().cloned().collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        match self.files.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("File not found".to_string())),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.files.lock().unwrap().len() as i64)
    }
}

/// File metadata store whose writes always fail. Used to exercise the
/// blob-written-but-metadata-missing partial failure path.
#[derive(Clone, Default)]
pub struct FailingFileStore;

#[async_trait]
impl FileMetadataStore for FailingFileStore {
    async fn insert(&self, _file: &StoredFile) -> Result<(), AppError> {
        Err(AppError::Internal("metadata store unavailable".to_string()))
    }

    async fn get(&self, _id: Uuid) -> Result<Option<StoredFile>, AppError> {
        Err(AppError::Internal("metadata store unavailable".to_string()))
    }

    async fn list_recent(&self) -> Result<Vec<StoredFile>, AppError> {
        Err(AppError::Internal("metadata store unavailable".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
        Err(AppError::Internal("metadata store unavailable".to_string()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(AppError::Internal("metadata store unavailable".to_string()))
    }
}
