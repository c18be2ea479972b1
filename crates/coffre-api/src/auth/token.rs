//! HS256 token issuance and verification.
//!
//! The signing secret comes from configuration, is injected once at
//! construction, and never changes for the life of the process. Verification
//! is a pure function of (token, secret, current time): no store lookup
//! happens, so a deleted or disabled user's outstanding token stays valid
//! until it expires. Expiry is the only invalidation mechanism.

use crate::auth::models::TokenClaims;
use chrono::{DateTime, Duration, Utc};
use coffre_core::models::UserRole;
use coffre_core::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Issues and verifies signed, time-limited authentication tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Produce a signed token for the given subject and role.
    pub fn issue(&self, user_id: Uuid, role: &UserRole) -> Result<String, AppError> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Issue with an explicit clock. Exposed so expiry behavior is testable
    /// without waiting out the real window.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        role: &UserRole,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = TokenClaims {
            sub: user_id,
            role: role.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.expiry).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate and decode a token.
    ///
    /// Fails with `Unauthorized` if the signature does not match, the token
    /// is malformed, or it has expired. Zero leeway.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Token has expired".to_string())
                    }
                    _ => AppError::Unauthorized("Invalid token".to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-signing-secret-at-least-32-characters-long";

    fn service() -> TokenService {
        TokenService::new(TEST_SECRET, 8)
    }

    #[test]
    fn issued_token_round_trips_subject_and_role() {
        let tokens = service();
        let user_id = Uuid::new_v4();

        let token = tokens.issue(user_id, &UserRole::Admin).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn claims_carry_exactly_four_fields() {
        let tokens = service();
        let token = tokens.issue(Uuid::new_v4(), &UserRole::Admin).unwrap();
        let claims = tokens.verify(&token).unwrap();

        let json = serde_json::to_value(&claims).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in ["sub", "role", "iat", "exp"] {
            assert!(object.contains_key(key));
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let issued_at = Utc::now() - Duration::hours(9);

        let token = tokens
            .issue_at(Uuid::new_v4(), &UserRole::Admin, issued_at)
            .unwrap();

        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(err.http_status_code(), 401);
    }

    #[test]
    fn token_issued_just_inside_the_window_still_verifies() {
        let tokens = service();
        let issued_at = Utc::now() - Duration::hours(7) - Duration::minutes(59);

        let token = tokens
            .issue_at(Uuid::new_v4(), &UserRole::Member, issued_at)
            .unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let tokens = service();
        let token = tokens.issue(Uuid::new_v4(), &UserRole::Admin).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(tokens.verify(&tampered).is_err());
        assert!(tokens.verify("not-a-token").is_err());
        assert!(tokens.verify("").is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let tokens = service();
        let other = TokenService::new("another-signing-secret-with-32-chars!!", 8);

        let token = other.issue(Uuid::new_v4(), &UserRole::Admin).unwrap();
        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
