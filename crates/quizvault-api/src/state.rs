//! Application state and sub-state extractors.
//!
//! Each service is its own sub-state so handlers extract only what they need
//! via Axum's `FromRef`.

use quizvault_core::Config;
use quizvault_db::BankStore;
use quizvault_storage::Storage;
use std::sync::Arc;

use crate::access::AccessPolicy;
use crate::services::{ExportService, ImportService, UploadService};

/// Upload limits and normalization settings
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub allowed_content_types: Vec<String>,
    pub image_max_dimension: u32,
    pub normalize_enabled: bool,
}

impl UploadConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_file_size: config.max_upload_size_bytes,
            allowed_content_types: config.allowed_content_types.clone(),
            image_max_dimension: config.image_max_dimension,
            normalize_enabled: config.image_normalize_enabled,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub import: ImportService,
    pub export: ExportService,
    pub upload: UploadService,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(
        banks: Arc<dyn BankStore>,
        access: Arc<dyn AccessPolicy>,
        storage: Arc<dyn Storage>,
        upload: UploadConfig,
    ) -> Self {
        Self {
            import: ImportService::new(banks.clone()),
            export: ExportService::new(banks, access),
            upload: UploadService::new(storage.clone(), upload),
            storage,
        }
    }
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for ImportService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.import.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for ExportService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.export.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.upload.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
