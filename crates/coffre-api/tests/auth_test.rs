//! Authentication API integration tests.
//!
//! Run with: `cargo test -p coffre-api --test auth_test`

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use coffre_core::models::UserRole;
use helpers::{login_token, setup_test_app, TEST_ADMIN_EMAIL};
use serde_json::Value;

#[tokio::test]
async fn login_with_valid_credentials_returns_token_and_user() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "admin@x.com", "password": "secret"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], TEST_ADMIN_EMAIL);
    assert_eq!(body["user"]["role"], "admin");

    // Neither the hash nor the internal id may leak.
    let user = body["user"].as_object().unwrap();
    assert_eq!(user.len(), 2);
}

#[tokio::test]
async fn login_token_decodes_to_the_admin_subject() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let claims = app.state.tokens.verify(&token).unwrap();
    assert_eq!(claims.sub, app.admin_id);
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn login_with_wrong_password_returns_400_without_token() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "admin@x.com", "password": "wrong"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn login_with_unknown_email_returns_400() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "nobody@x.com", "password": "secret"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn login_with_malformed_email_returns_400() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": "not-an-email", "password": "secret"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn issued_token_authorizes_protected_routes() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let response = app
        .server
        .get("/api/files")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_token_is_rejected_with_401() {
    let app = setup_test_app().await;

    let response = app.server.get("/api/files").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected_with_401() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get("/api/files")
        .add_header("Authorization", "Basic YWRtaW46c2VjcmV0")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn garbage_token_is_rejected_with_401() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get("/api/files")
        .add_header("Authorization", "Bearer not.a.token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_rejected_with_401() {
    let app = setup_test_app().await;

    let expired = app
        .state
        .tokens
        .issue_at(
            app.admin_id,
            &UserRole::Admin,
            Utc::now() - Duration::hours(9),
        )
        .unwrap();

    let response = app
        .server
        .get("/api/files")
        .add_header("Authorization", format!("Bearer {}", expired))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let app = setup_test_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
