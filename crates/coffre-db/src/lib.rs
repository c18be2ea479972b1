//! Database repositories for the data access layer
//!
//! Postgres-backed repositories plus the store traits the services depend
//! on, so everything above this crate can run against in-memory doubles.

pub mod db;
pub mod test_helpers;
pub mod traits;

pub use db::files::FileRepository;
pub use db::users::UserRepository;
pub use traits::{FileMetadataStore, UserStore};
