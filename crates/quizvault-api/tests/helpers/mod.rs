//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p quizvault-api`. The bank store is
//! the in-memory double, so no database is needed.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use quizvault_api::setup::routes::{build_router, API_PREFIX};
use quizvault_api::{AppState, DefaultAccessPolicy, UploadConfig};
use quizvault_core::models::{Actor, ActorRole};
use quizvault_db::InMemoryBankStore;
use quizvault_storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;
pub const IMAGE_MAX_DIMENSION: u32 = 256;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryBankStore,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently in the upload directory
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("read upload dir")
            .count()
    }
}

pub async fn setup_test_app() -> TestApp {
    let store = InMemoryBankStore::new();
    let upload_dir = tempfile::tempdir().expect("create temp dir");
    let storage = LocalStorage::new(upload_dir.path(), "http://localhost/uploads".to_string())
        .await
        .expect("create local storage");

    let state = Arc::new(AppState::new(
        Arc::new(store.clone()),
        Arc::new(DefaultAccessPolicy),
        Arc::new(storage),
        UploadConfig {
            max_file_size: MAX_UPLOAD_BYTES,
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
            ],
            image_max_dimension: IMAGE_MAX_DIMENSION,
            normalize_enabled: true,
        },
    ));

    let server = TestServer::new(build_router(state, MAX_UPLOAD_BYTES)).expect("create test server");

    TestApp {
        server,
        store,
        upload_dir,
    }
}

pub fn editor() -> Actor {
    Actor::new(Uuid::new_v4(), ActorRole::Editor)
}

pub fn admin() -> Actor {
    Actor::new(Uuid::new_v4(), ActorRole::Admin)
}

/// Identity headers as forwarded by the upstream auth layer
pub fn role_name(actor: &Actor) -> &'static str {
    if actor.is_admin() {
        "admin"
    } else {
        "editor"
    }
}
