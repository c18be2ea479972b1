//! OpenAPI document definition.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::login::login,
        crate::handlers::file_upload::upload_file,
        crate::handlers::file_list::list_files,
        crate::handlers::file_delete::delete_file,
        crate::handlers::stats::stats,
        crate::handlers::health::health,
    ),
    components(schemas(
        coffre_core::models::StoredFile,
        coffre_core::models::UserResponse,
        coffre_core::models::UserRole,
        crate::handlers::login::LoginRequest,
        crate::handlers::file_upload::UploadResponse,
        crate::handlers::file_delete::MessageResponse,
        crate::services::auth::LoginResponse,
        crate::services::files::StoreStats,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Administrator authentication"),
        (name = "files", description = "File upload, listing, and deletion"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
