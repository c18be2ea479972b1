//! Test helpers: build the real router over in-memory stores and
//! tempdir-backed blob storage, so HTTP behavior is exercised end to end
//! without Postgres.

#![allow(dead_code)]

use axum_test::TestServer;
use coffre_api::auth::token::TokenService;
use coffre_api::services::auth::AuthService;
use coffre_api::services::files::FileLifecycleService;
use coffre_api::setup::routes::setup_routes;
use coffre_api::state::AppState;
use coffre_core::models::{User, UserRole};
use coffre_core::Config;
use coffre_db::test_helpers::{MockFileStore, MockUserStore};
use coffre_db::{FileMetadataStore, UserStore};
use coffre_storage::{LocalStorage, Storage};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-signing-secret-at-least-32-characters-long";
pub const TEST_ADMIN_EMAIL: &str = "admin@x.com";
pub const TEST_ADMIN_PASSWORD: &str = "secret";

/// Test application: server plus handles to inspect state and disk.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub upload_dir: TempDir,
    pub admin_id: Uuid,
}

impl TestApp {
    /// Number of blobs currently on disk.
    pub fn blob_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path()).unwrap().count()
    }
}

fn test_config(upload_dir: &TempDir) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        database_url: "postgresql://unused".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 5,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 8,
        upload_dir: upload_dir.path().display().to_string(),
        max_file_size_bytes: 1024 * 1024,
    }
}

/// Setup test app with an isolated upload dir and a seeded admin user.
pub async fn setup_test_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("create temp upload dir");
    let config = test_config(&upload_dir);

    let admin_id = Uuid::new_v4();
    let users = MockUserStore::new();
    users.add_user(User {
        id: admin_id,
        email: TEST_ADMIN_EMAIL.to_string(),
        password_hash: bcrypt::hash(TEST_ADMIN_PASSWORD, 4).unwrap(),
        role: UserRole::Admin,
        created_at: chrono::Utc::now(),
    });

    let users: Arc<dyn UserStore> = Arc::new(users);
    let files: Arc<dyn FileMetadataStore> = Arc::new(MockFileStore::new());
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(upload_dir.path())
            .await
            .expect("init storage"),
    );
    let tokens = TokenService::new(TEST_JWT_SECRET, config.jwt_expiry_hours());

    let state = Arc::new(AppState {
        auth: AuthService::new(users.clone(), tokens.clone()),
        files: FileLifecycleService::new(files, users, storage.clone()),
        storage,
        tokens,
        config: config.clone(),
    });

    let router = setup_routes(&config, state.clone()).expect("build router");
    let server = TestServer::new(router).expect("start test server");

    TestApp {
        server,
        state,
        upload_dir,
        admin_id,
    }
}

/// Log in as the seeded admin and return the bearer token.
pub async fn login_token(app: &TestApp) -> String {
    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": TEST_ADMIN_EMAIL,
            "password": TEST_ADMIN_PASSWORD,
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["token"].as_str().expect("token in response").to_string()
}

/// Build a multipart body with a single `file` field.
/// Returns (content-type header value, body bytes).
pub fn multipart_body(filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let boundary = "coffre-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            boundary, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}

/// Upload `content` as `filename` with the given token; returns the
/// response for further assertions.
pub async fn upload_file(
    app: &TestApp,
    token: &str,
    filename: &str,
    content: &[u8],
) -> axum_test::TestResponse {
    let (content_type, body) = multipart_body(filename, content);
    app.server
        .post("/api/files/upload")
        .add_header("Authorization", format!("Bearer {}", token))
        .content_type(&content_type)
        .bytes(body.into())
        .await
}
