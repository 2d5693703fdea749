#[cfg(feature = "storage-memory")]
use crate::MemoryMultipartStore;
#[cfg(feature = "storage-s3")]
use crate::S3MultipartStore;
use crate::{MultipartStore, StorageBackend, StorageError, StorageResult};
use conveyor_core::Config;
use std::sync::Arc;

/// Create a multipart store backend based on configuration
pub async fn create_store(config: &Config) -> StorageResult<Arc<dyn MultipartStore>> {
    let backend = config.storage_backend().unwrap_or(StorageBackend::S3);

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config
                .s3_region()
                .map(String::from)
                .or_else(|| config.aws_region().map(String::from))
                .ok_or_else(|| {
                    StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
                })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let store = S3MultipartStore::new(bucket, region, endpoint).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => {
            let bucket = config
                .s3_bucket()
                .unwrap_or("uploads")
                .to_string();
            let base_url = config
                .memory_base_url()
                .unwrap_or("memory://local")
                .to_string();

            Ok(Arc::new(MemoryMultipartStore::new(bucket, base_url)))
        }

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)".to_string(),
        )),
    }
}
