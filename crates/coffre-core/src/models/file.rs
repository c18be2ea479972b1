use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata record for an uploaded blob.
///
/// The record and the on-disk blob are independently-failable resources; the
/// lifecycle service keeps them consistent (best effort, no transaction
/// spanning both). `owner_id` is a weak reference used for attribution only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredFile {
    pub id: Uuid,
    /// Generated, collision-resistant name the blob is stored under.
    pub file_name: String,
    /// Key used to address the blob in storage.
    pub storage_key: String,
    /// Name the client uploaded the file as.
    pub original_filename: String,
    pub size: i64,
    pub owner_id: Option<Uuid>,
    pub uploaded_at: DateTime<Utc>,
}
