//! Router construction

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use quizvault_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";

/// Room for multipart boundaries and headers on top of the largest accepted file
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    build_router(state, config.max_upload_size_bytes)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
}

/// All routes with body limiting and request tracing
pub fn build_router(state: Arc<AppState>, max_upload_size_bytes: usize) -> Router {
    let api = Router::new()
        .route("/banks/import", post(handlers::banks::import_bank))
        .route("/banks/{id}/export", get(handlers::banks::export_bank))
        .route("/assets", post(handlers::assets::upload_asset));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest(API_PREFIX, api)
        // The upload service reports oversized files itself; this only bounds the request
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            max_upload_size_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
