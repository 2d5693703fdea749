//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p conveyor-api --test uploads_test`.
//! Tests run against the in-memory storage backend, so no external provider
//! or credentials are required.

use axum_test::TestServer;
use conveyor_api::setup::routes;
use conveyor_api::state::AppState;
use conveyor_core::{BaseConfig, Config, GatewayConfig, StorageBackend};
use conveyor_storage::{MemoryMultipartStore, MultipartStore};
use std::sync::Arc;

/// Test application: server plus owned resources.
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app backed by an isolated in-memory store.
pub fn setup_test_app() -> TestApp {
    let config = create_test_config();

    let store: Arc<dyn MultipartStore> = Arc::new(MemoryMultipartStore::new(
        "uploads".to_string(),
        "memory://test".to_string(),
    ));

    let state = Arc::new(AppState {
        store,
        is_production: false,
        config: config.clone(),
    });

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server }
}

fn create_test_config() -> Config {
    Config(Box::new(GatewayConfig {
        base: BaseConfig {
            server_port: 9999,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        storage_backend: Some(StorageBackend::Memory),
        s3_bucket: Some("uploads".to_string()),
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        memory_base_url: Some("memory://test".to_string()),
        part_url_ttl_secs: 3600,
    }))
}
