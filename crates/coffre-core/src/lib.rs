//! Coffre core library
//!
//! Domain models, the unified error type, and configuration shared by the
//! storage, database, and API crates.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, LogLevel};
