//! Domain models

mod file;
mod user;

pub use file::StoredFile;
pub use user::{User, UserResponse, UserRole};
