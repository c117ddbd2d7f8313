//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use quizvault_core::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => AppError::NotFound(name),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// Files are addressed by generated storage names (see [`crate::keys`]).
/// The upload pipeline inspects and rewrites stored files in place, so every
/// backend exposes a local filesystem path for a name.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a file under `storage_name` and return its public URL
    async fn write(&self, storage_name: &str, data: &[u8]) -> StorageResult<String>;

    /// Delete a file. Deleting a missing file is not an error.
    async fn delete(&self, storage_name: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_name: &str) -> StorageResult<bool>;

    /// Size of a stored file in bytes
    async fn content_length(&self, storage_name: &str) -> StorageResult<u64>;

    /// Filesystem path of a stored file
    fn path_for(&self, storage_name: &str) -> StorageResult<PathBuf>;

    /// Public URL of a stored file
    fn url_for(&self, storage_name: &str) -> String;
}
