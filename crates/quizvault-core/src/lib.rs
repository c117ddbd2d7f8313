//! Quizvault Core Library
//!
//! This crate provides the domain models, error types, configuration, import
//! document validation and content sanitization shared across all Quizvault
//! components. Nothing in here performs I/O beyond reading the environment.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel, ValidationIssue};
pub use sanitize::{sanitize_question, sanitize_rich_text, SanitizedQuestion};
pub use validation::validate_import_document;
