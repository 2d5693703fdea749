//! Conveyor Storage Library
//!
//! This crate provides the multipart-upload abstraction and its backends.
//! A [`MultipartStore`] owns the four provider calls the gateway orchestrates:
//! create a session, sign a part URL, complete, abort. The store holds no
//! session state of its own for the S3 backend; the provider is the sole
//! authority on which `(key, upload_id)` pairs are valid.

pub mod factory;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use conveyor_core::StorageBackend;
pub use factory::create_store;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryMultipartStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3MultipartStore;
pub use traits::{MultipartStore, StorageError, StorageResult};
