//! Storage setup and initialization

use anyhow::Result;
use conveyor_core::Config;
use conveyor_storage::{create_store, MultipartStore};
use std::sync::Arc;

/// Build the process-wide storage handle.
///
/// Constructed once before the listener starts accepting requests and treated
/// as read-only for the remainder of the process lifetime.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn MultipartStore>> {
    tracing::info!("Initializing storage backend...");
    let store = create_store(config).await?;
    tracing::info!(
        backend = %store.backend_type(),
        "Storage backend initialized successfully"
    );
    Ok(store)
}
