//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use conveyor_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize telemetry first
    crate::telemetry::init_telemetry();

    tracing::info!("Configuration loaded and validated successfully");

    // Setup the storage handle
    let store = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        store,
        is_production: config.is_production(),
        config,
    });

    // Setup routes
    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
