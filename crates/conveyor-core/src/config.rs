//! Configuration module
//!
//! This module provides configuration for the upload gateway: server binding,
//! CORS, and storage backend settings. Everything is read once from the
//! environment at startup and treated as immutable afterwards.

use std::env;
use std::time::Duration;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 9999;
const DEFAULT_PART_URL_TTL_SECS: u64 = 3600;

/// Base configuration shared by any service in this workspace
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Upload gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub aws_region: Option<String>,
    pub memory_base_url: Option<String>,
    /// Lifetime of presigned part URLs, in seconds
    pub part_url_ttl_secs: u64,
}

/// Application configuration (upload gateway).
#[derive(Clone, Debug)]
pub struct Config(pub Box<GatewayConfig>);

impl Config {
    fn as_gateway(&self) -> &GatewayConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_gateway().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = GatewayConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Fail-fast configuration checks, run before the server starts accepting
    /// requests.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend().unwrap_or(StorageBackend::S3) {
            StorageBackend::S3 => {
                if self.s3_bucket().is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using the S3 storage backend"
                    ));
                }
                if self.s3_region().is_none() && self.aws_region().is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using the S3 storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }
        if self.part_url_ttl().is_zero() {
            return Err(anyhow::anyhow!("PART_URL_TTL_SECS must be greater than 0"));
        }
        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_gateway().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_gateway().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_gateway().base.environment
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.as_gateway().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_gateway().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_gateway().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_gateway().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_gateway().aws_region.as_deref()
    }

    pub fn memory_base_url(&self) -> Option<&str> {
        self.as_gateway().memory_base_url.as_deref()
    }

    pub fn part_url_ttl(&self) -> Duration {
        Duration::from_secs(self.as_gateway().part_url_ttl_secs)
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let storage_backend =
            env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "s3" => Some(StorageBackend::S3),
                    "memory" => Some(StorageBackend::Memory),
                    _ => None,
                });

        Ok(GatewayConfig {
            base,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            memory_base_url: env::var("MEMORY_STORE_BASE_URL").ok(),
            part_url_ttl_secs: env::var("PART_URL_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_PART_URL_TTL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_PART_URL_TTL_SECS),
        })
    }
}
