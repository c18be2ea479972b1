use crate::auth::models::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::files::StoreStats;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// Dashboard stats: user and file counts.
#[utoipa::path(
    get,
    path = "/api/files/stats",
    tag = "files",
    responses(
        (status = 200, description = "Aggregate counts", body = StoreStats),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %ctx.user_id, operation = "stats"))]
pub async fn stats(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let stats = state.files.stats().await?;
    Ok(Json(stats))
}
