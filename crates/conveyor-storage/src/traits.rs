//! Multipart storage abstraction trait
//!
//! This module defines the MultipartStore trait that all storage backends
//! must implement.

use async_trait::async_trait;
use conveyor_core::models::PartReceipt;
use conveyor_core::StorageBackend;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The provider rejected or failed a request (bad session id, permission
    /// denied, missing parts, provider outage).
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    /// Local signing computation failed (malformed signing parameters,
    /// missing credentials).
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The provider answered but the response is missing a required field.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Multipart storage abstraction trait
///
/// Each method is a single pass-through call against the provider; no retry,
/// caching, or session tracking happens behind this trait. Callers supply the
/// `(key, upload_id)` pair on every call after `create_upload` and the store
/// forwards it verbatim.
#[async_trait]
pub trait MultipartStore: Send + Sync {
    /// Open a new multipart upload session for `key`.
    ///
    /// Returns the provider-assigned upload id verbatim. The provider keeps
    /// the in-progress upload alive until it is completed, aborted, or reaped
    /// by its own lifecycle policy.
    async fn create_upload(&self, key: &str) -> StorageResult<String>;

    /// Produce a time-limited signed URL for uploading exactly one part of an
    /// existing session.
    ///
    /// Does not verify that the session exists or that `part_number` is
    /// within the provider's bounds; a bad tuple surfaces when the URL is
    /// used or at completion time. Signing is a local computation and does
    /// not call the provider over the network.
    async fn sign_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Ask the provider to stitch the uploaded parts into the final object.
    ///
    /// The provider validates receipt coverage, ETags, and contiguity.
    /// Returns the final object's resource location. Terminal: the session
    /// must not be reused afterwards.
    async fn complete_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[PartReceipt],
    ) -> StorageResult<String>;

    /// Discard an in-progress upload and release the provider-side resources.
    async fn abort_upload(&self, key: &str, upload_id: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
