//! In-process multipart store
//!
//! Models the provider side of the multipart protocol so the gateway can run
//! without object storage (local development, integration tests). Sessions
//! live in a map keyed by `(key, upload_id)`; completion enforces the same
//! receipt rules S3 does: parts contiguous from 1, non-empty ETags.

use crate::traits::{MultipartStore, StorageError, StorageResult};
use async_trait::async_trait;
use conveyor_core::models::PartReceipt;
use conveyor_core::StorageBackend;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory multipart store implementation
pub struct MemoryMultipartStore {
    bucket: String,
    base_url: String,
    sessions: Mutex<HashSet<(String, String)>>,
}

impl MemoryMultipartStore {
    pub fn new(bucket: String, base_url: String) -> Self {
        MemoryMultipartStore {
            bucket,
            base_url: base_url.trim_end_matches('/').to_string(),
            sessions: Mutex::new(HashSet::new()),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, key)
    }
}

#[async_trait]
impl MultipartStore for MemoryMultipartStore {
    async fn create_upload(&self, key: &str) -> StorageResult<String> {
        let upload_id = Uuid::new_v4().simple().to_string();
        self.sessions
            .lock()
            .await
            .insert((key.to_string(), upload_id.clone()));

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            upload_id = %upload_id,
            "Memory multipart upload created"
        );

        Ok(upload_id)
    }

    async fn sign_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        // Like the real provider, signing does not check that the session
        // exists; a bad tuple surfaces at completion time.
        Ok(format!(
            "{}?uploadId={}&partNumber={}",
            self.object_url(key),
            upload_id,
            part_number
        ))
    }

    async fn complete_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[PartReceipt],
    ) -> StorageResult<String> {
        let mut sessions = self.sessions.lock().await;
        let session = (key.to_string(), upload_id.to_string());

        if !sessions.contains(&session) {
            return Err(StorageError::Upstream(format!(
                "no such upload: {} for key {}",
                upload_id, key
            )));
        }

        if parts.is_empty() {
            return Err(StorageError::Upstream(
                "multipart upload must have at least one part".to_string(),
            ));
        }

        // S3 rejects completion when part numbers are not ascending and
        // contiguous from 1, or when an ETag is missing.
        for (index, part) in parts.iter().enumerate() {
            let expected = index as i32 + 1;
            if part.part_number != expected {
                return Err(StorageError::Upstream(format!(
                    "part numbers are not contiguous: expected {}, got {}",
                    expected, part.part_number
                )));
            }
            if part.e_tag.is_empty() {
                return Err(StorageError::Upstream(format!(
                    "missing ETag for part {}",
                    part.part_number
                )));
            }
        }

        sessions.remove(&session);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            upload_id = %upload_id,
            parts = parts.len(),
            "Memory multipart upload completed"
        );

        Ok(self.object_url(key))
    }

    async fn abort_upload(&self, key: &str, upload_id: &str) -> StorageResult<()> {
        let mut sessions = self.sessions.lock().await;
        let session = (key.to_string(), upload_id.to_string());

        if !sessions.remove(&session) {
            return Err(StorageError::Upstream(format!(
                "no such upload: {} for key {}",
                upload_id, key
            )));
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            upload_id = %upload_id,
            "Memory multipart upload aborted"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
