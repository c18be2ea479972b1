//! Login flow: credential lookup, password verification, token issuance.

use crate::auth::password;
use crate::auth::token::TokenService;
use coffre_core::models::UserResponse;
use coffre_core::AppError;
use coffre_db::UserStore;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Successful login payload. Never contains the password hash or the
/// internal user id.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Orchestrates the credential store, password verifier, and token service.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Authenticate and issue a session token.
    ///
    /// Unknown email and wrong password are both expected, 400-class
    /// outcomes with distinct messages; anything else (store down, hashing
    /// failure) surfaces as a 500-class error.
    #[tracing::instrument(skip(self, password), fields(operation = "login"))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::BadRequest("User not found".to_string()))?;

        if !password::verify(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.role)?;

        tracing::info!(email = %user.email, role = %user.role, "Login succeeded");

        Ok(LoginResponse {
            token,
            user: UserResponse::from(&user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use coffre_core::models::{User, UserRole};
    use coffre_db::test_helpers::MockUserStore;
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-signing-secret-at-least-32-characters-long";

    fn service_with_admin() -> (AuthService, Uuid) {
        let users = MockUserStore::new();
        let user_id = Uuid::new_v4();
        users.add_user(User {
            id: user_id,
            email: "admin@x.com".to_string(),
            password_hash: bcrypt::hash("secret", 4).unwrap(),
            role: UserRole::Admin,
            created_at: Utc::now(),
        });
        let tokens = TokenService::new(TEST_SECRET, 8);
        (AuthService::new(Arc::new(users), tokens), user_id)
    }

    #[tokio::test]
    async fn login_issues_token_for_the_right_subject() {
        let (auth, user_id) = service_with_admin();

        let response = auth.login("admin@x.com", "secret").await.unwrap();

        let claims = TokenService::new(TEST_SECRET, 8)
            .verify(&response.token)
            .unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "admin");
        assert_eq!(response.user.email, "admin@x.com");
        assert_eq!(response.user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn login_response_never_exposes_hash_or_id() {
        let (auth, _) = service_with_admin();

        let response = auth.login("admin@x.com", "secret").await.unwrap();
        let json = serde_json::to_value(&response).unwrap();

        let user = json["user"].as_object().unwrap();
        assert_eq!(user.len(), 2);
        assert!(user.contains_key("email"));
        assert!(user.contains_key("role"));
    }

    #[tokio::test]
    async fn wrong_password_fails_with_invalid_credentials() {
        let (auth, _) = service_with_admin();

        let err = auth.login("admin@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.http_status_code(), 400);
    }

    #[tokio::test]
    async fn unknown_email_fails_with_user_not_found() {
        let (auth, _) = service_with_admin();

        let err = auth.login("nobody@x.com", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.client_message(), "User not found");
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let (auth, _) = service_with_admin();

        let err = auth.login("Admin@x.com", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
