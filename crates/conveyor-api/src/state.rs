//! Application state.
//!
//! The storage handle is constructed once during startup and injected here
//! (dependency injection instead of a process-global client). No field is
//! mutated after initialization, so requests share the state without locking.

use conveyor_core::Config;
use conveyor_storage::MultipartStore;
use std::sync::Arc;

/// Main application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide storage handle; read-only for the process lifetime
    pub store: Arc<dyn MultipartStore>,
    pub config: Config,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
