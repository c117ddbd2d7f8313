//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::access::DefaultAccessPolicy;
use crate::state::{AppState, UploadConfig};
use anyhow::Result;
use quizvault_core::Config;
use quizvault_db::BankRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(environment = %config.environment, "Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(
        Arc::new(BankRepository::new(pool)),
        Arc::new(DefaultAccessPolicy),
        storage,
        UploadConfig::from_config(&config),
    ));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
