//! Application setup and initialization
//!
//! All initialization logic lives here instead of main.rs so the pieces can
//! be wired differently in tests.

pub mod database;
pub mod routes;
pub mod server;

use crate::auth::token::TokenService;
use crate::services::auth::AuthService;
use crate::services::files::FileLifecycleService;
use crate::state::AppState;
use anyhow::{Context, Result};
use coffre_core::Config;
use coffre_db::{FileMetadataStore, FileRepository, UserRepository, UserStore};
use coffre_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_tracing();
    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup blob storage (creates the upload directory if absent)
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.upload_dir())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?,
    );

    // Repositories and services
    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
    let files: Arc<dyn FileMetadataStore> = Arc::new(FileRepository::new(pool));
    let tokens = TokenService::new(config.jwt_secret(), config.jwt_expiry_hours());

    let state = Arc::new(AppState {
        auth: AuthService::new(users.clone(), tokens.clone()),
        files: FileLifecycleService::new(files, users, storage.clone()),
        storage,
        tokens,
        config: config.clone(),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
