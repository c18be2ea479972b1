//! Postgres repository implementations
//!
//! One repository per table. Row structs own the sqlx mapping; domain types
//! stay free of database details.

pub mod files;
pub mod users;
