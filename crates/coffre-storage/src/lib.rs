//! Coffre storage library
//!
//! Blob storage abstraction and the local-filesystem backend. Blobs are
//! addressed by generated names; keys must not contain `..` or a leading `/`.

pub mod local;
pub mod traits;

pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredBlob};
