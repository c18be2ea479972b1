//! Error types module
//!
//! All failures are unified under the `AppError` enum. Each variant carries
//! enough metadata (HTTP status, machine-readable code, log level) for the
//! transport layer to render it without inspecting message contents.
//!
//! Expected outcomes (missing record, bad credentials, bad token) map to
//! 4xx and log at debug/warn; unexpected failures (database, storage, I/O)
//! map to 500 and log at error. Credentials and password hashes must never
//! be embedded in an error message.

use sqlx::Error as SqlxError;
use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like a failed login or a missing record
    Debug,
    /// Recoverable issues worth operator attention
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

impl AppError {
    /// HTTP status code the transport layer should answer with.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => 500,
            AppError::NotFound(_) => 404,
            AppError::Unauthorized(_) => 401,
            AppError::PayloadTooLarge(_) => 413,
            AppError::InvalidCredentials | AppError::BadRequest(_) | AppError::InvalidInput(_) => {
                400
            }
        }
    }

    /// Machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::NotFound(_)
            | AppError::InvalidCredentials
            | AppError::BadRequest(_)
            | AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::Unauthorized(_) | AppError::PayloadTooLarge(_) => LogLevel::Warn,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }

    /// Client-facing message. Expected errors expose their short description;
    /// unexpected errors propagate their message for operator visibility.
    pub fn client_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::InvalidInput(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            _ => self.to_string(),
        }
    }
}
