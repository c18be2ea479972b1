//! Auth guard middleware.
//!
//! Runs in front of every protected route: extracts the bearer token,
//! verifies it, and attaches the decoded identity to the request. Rejected
//! requests never reach their handler, so an unauthenticated upload cannot
//! write a blob.

use crate::auth::models::AuthContext;
use crate::auth::token::TokenService;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use coffre_core::models::UserRole;
use coffre_core::AppError;
use std::sync::Arc;

/// State for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenService,
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn auth_middleware(
    State(auth): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match header.and_then(bearer_token) {
        Some(token) => token,
        None => {
            return HttpAppError(AppError::Unauthorized("No token provided".to_string()))
                .into_response();
        }
    };

    let claims = match auth.tokens.verify(token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    let role = match UserRole::parse(&claims.role) {
        Ok(role) => role,
        Err(_) => {
            return HttpAppError(AppError::Unauthorized("Invalid token".to_string()))
                .into_response();
        }
    };

    request.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role,
    });
    next.run(request).await
}
