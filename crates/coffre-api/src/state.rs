//! Application state shared by handlers.
//!
//! Stores are held as trait objects so tests can swap in-memory doubles for
//! the Postgres repositories without touching the router.

use crate::auth::token::TokenService;
use crate::services::auth::AuthService;
use crate::services::files::FileLifecycleService;
use coffre_core::Config;
use coffre_storage::Storage;
use std::sync::Arc;

/// Main application state: services, storage, token service, configuration.
pub struct AppState {
    pub auth: AuthService,
    pub files: FileLifecycleService,
    pub storage: Arc<dyn Storage>,
    pub tokens: TokenService,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
