use crate::traits::{MultipartStore, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_sdk_s3::Client;
use conveyor_core::models::PartReceipt;
use conveyor_core::StorageBackend;
use std::time::Duration;

/// S3 multipart store implementation
#[derive(Clone)]
pub struct S3MultipartStore {
    client: Client,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3MultipartStore {
    /// Create a new S3MultipartStore instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, "https://nyc3.digitaloceanspaces.com" for DigitalOcean Spaces)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let region_provider =
            RegionProviderChain::first_try(aws_config::Region::new(region.clone()));

        // A single upstream failure must surface to the caller immediately;
        // the SDK's default retry policy is turned off.
        let retry_config = RetryConfig::disabled();

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config.clone())
            .load()
            .await;

        // Configure S3 client with custom endpoint if provided (for S3-compatible providers)
        let client = if let Some(ref endpoint) = endpoint_url {
            let mut s3_config_builder = aws_sdk_s3::Config::builder()
                .endpoint_url(endpoint)
                .region(config.region().cloned())
                .retry_config(retry_config);
            if let Some(provider) = config.credentials_provider().into_iter().next() {
                s3_config_builder = s3_config_builder.credentials_provider(provider);
            }
            // Path-style addressing is required by MinIO and most other
            // S3-compatible providers.
            s3_config_builder = s3_config_builder.force_path_style(true);

            Client::from_conf(s3_config_builder.build())
        } else {
            Client::new(&config)
        };

        Ok(S3MultipartStore {
            client,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Generate public URL for an S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses the endpoint URL if provided
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            // Path-style for compatibility: {endpoint}/{bucket}/{key}
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }
}

#[async_trait]
impl MultipartStore for S3MultipartStore {
    async fn create_upload(&self, key: &str) -> StorageResult<String> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 create multipart upload failed"
                );
                StorageError::Upstream(e.to_string())
            })?;

        let upload_id = response
            .upload_id()
            .ok_or_else(|| {
                StorageError::InvalidResponse(
                    "no upload id in CreateMultipartUpload response".to_string(),
                )
            })?
            .to_string();

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            upload_id = %upload_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 multipart upload created"
        );

        Ok(upload_id)
    }

    async fn sign_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::Signing(e.to_string()))?;

        // presigned() signs locally over request parameters plus resolved
        // credentials; it does not contact S3.
        let presigned_request = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    part_number = part_number,
                    "S3 part URL signing failed"
                );
                StorageError::Signing(e.to_string())
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            upload_id = %upload_id,
            part_number = part_number,
            expires_in_secs = expires_in.as_secs(),
            "Signed part upload URL"
        );

        Ok(presigned_request.uri().to_string())
    }

    async fn complete_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: &[PartReceipt],
    ) -> StorageResult<String> {
        let start = std::time::Instant::now();

        let completed_parts: Vec<CompletedPart> = parts
            .iter()
            .map(|p| {
                CompletedPart::builder()
                    .part_number(p.part_number)
                    .e_tag(p.e_tag.clone())
                    .build()
            })
            .collect();

        let multipart_upload = CompletedMultipartUpload::builder()
            .set_parts(Some(completed_parts))
            .build();

        let response = self
            .client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(multipart_upload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    upload_id = %upload_id,
                    parts = parts.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 complete multipart upload failed"
                );
                StorageError::Upstream(e.to_string())
            })?;

        let location = response
            .location()
            .map(str::to_string)
            .unwrap_or_else(|| self.generate_url(key));

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            upload_id = %upload_id,
            parts = parts.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 multipart upload completed"
        );

        Ok(location)
    }

    async fn abort_upload(&self, key: &str, upload_id: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        self.client
            .abort_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    upload_id = %upload_id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 abort multipart upload failed"
                );
                StorageError::Upstream(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            upload_id = %upload_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 multipart upload aborted"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
