//! Storage setup and initialization

use anyhow::{Context, Result};
use quizvault_core::Config;
use quizvault_storage::{LocalStorage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.upload_dir, config.upload_base_url.clone())
        .await
        .context("Failed to initialize upload storage")?;

    tracing::info!(
        upload_dir = %config.upload_dir,
        base_url = %config.upload_base_url,
        "Upload storage initialized"
    );

    Ok(Arc::new(storage))
}
