//! Password verification against stored bcrypt hashes.
//!
//! bcrypt is salted, slow by cost factor, and compares in constant time.
//! Neither the plaintext nor the stored hash may ever be logged or embedded
//! in an error message.

use coffre_core::AppError;

/// Hash a plaintext password for storage. Used by provisioning, not by the
/// request path.
pub fn hash(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Compare a plaintext credential against a stored hash.
pub fn verify(plain: &str, stored_hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(plain, stored_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}
