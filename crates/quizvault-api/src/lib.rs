//! Quizvault API Library
//!
//! This crate provides the HTTP handlers, the import/export/upload services
//! behind them, and application setup.

// Module declarations
pub mod access;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

// Re-exports
pub use access::{AccessPolicy, DefaultAccessPolicy};
pub use error::{ErrorResponse, HttpAppError, ValidatedJson};
pub use state::{AppState, UploadConfig};
