//! User repository: lookups against the users table.

use crate::traits::UserStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coffre_core::models::{User, UserRole};
use coffre_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Row type for the users table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, AppError> {
        Ok(User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            role: UserRole::parse(&self.role)?,
            created_at: self.created_at,
        })
    }
}

/// Repository for the users table.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user by email (case-sensitive, email is the unique lookup key).
    #[tracing::instrument(skip(self), fields(db.table = "users"))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> = sqlx::query_as::<Postgres, UserRow>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| r.into_user()).transpose()
    }

    /// Insert a new user and return it. Used by out-of-band provisioning.
    #[tracing::instrument(skip(self, password_hash), fields(db.table = "users"))]
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let row: UserRow = sqlx::query_as::<Postgres, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role.to_string())
        .fetch_one(&self.pool)
        .await?;
        row.into_user()
    }

    /// Count user records.
    #[tracing::instrument(skip(self), fields(db.table = "users"))]
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        UserRepository::get_by_email(self, email).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        UserRepository::count(self).await
    }
}
