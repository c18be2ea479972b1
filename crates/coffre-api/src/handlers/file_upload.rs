use crate::auth::models::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, sanitize_filename, validate_file_size};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use coffre_core::models::StoredFile;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub file: StoredFile,
}

/// Upload a file.
///
/// Accepts a multipart body with a single `file` field. The blob is written
/// to storage under a generated name, then its metadata record is persisted
/// with the authenticated user as owner.
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    responses(
        (status = 201, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "Invalid multipart body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(user_id = %ctx.user_id, operation = "upload_file")
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (data, original_filename) = extract_multipart_file(multipart).await?;

    validate_file_size(data.len(), state.config.max_file_size_bytes())?;
    let original_filename = sanitize_filename(&original_filename)?;

    let file = state
        .files
        .upload(data, &original_filename, Some(ctx.user_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file,
        }),
    ))
}
