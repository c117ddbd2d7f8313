use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for stored files (e.g., "./data/uploads")
    /// * `base_url` - Base URL the directory is served under (e.g., "http://localhost:4000/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage name to a filesystem path.
    ///
    /// Storage names are flat: no separators, no traversal, no hidden files.
    fn name_to_path(&self, storage_name: &str) -> StorageResult<PathBuf> {
        if storage_name.is_empty()
            || storage_name.contains("..")
            || storage_name.contains('/')
            || storage_name.contains('\\')
            || storage_name.starts_with('.')
        {
            return Err(StorageError::InvalidName(storage_name.to_string()));
        }

        Ok(self.base_path.join(storage_name))
    }
}

/// Write and sync `data` into the freshly created `file` at `path`.
///
/// A partially written file is removed before the error is returned.
async fn fill_new_file(mut file: fs::File, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let result = async {
        file.write_all(data).await?;
        file.flush().await?;
        file.sync_all().await
    }
    .await;

    if result.is_err() {
        drop(file);
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove partially written file"
            );
        }
    }

    result
}

#[async_trait]
impl Storage for LocalStorage {
    async fn write(&self, storage_name: &str, data: &[u8]) -> StorageResult<String> {
        let path = self.name_to_path(storage_name)?;
        let start = std::time::Instant::now();

        // create_new: a generated name never overwrites an existing file
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
            })?;

        fill_new_file(file, &path, data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            storage_name = %storage_name,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(self.url_for(storage_name))
    }

    async fn delete(&self, storage_name: &str) -> StorageResult<()> {
        let path = self.name_to_path(storage_name)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            storage_name = %storage_name,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(storage_name)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn content_length(&self, storage_name: &str) -> StorageResult<u64> {
        let path = self.name_to_path(storage_name)?;
        let meta = fs::metadata(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(storage_name.to_string()),
            _ => StorageError::IoError(e),
        })?;
        Ok(meta.len())
    }

    fn path_for(&self, storage_name: &str) -> StorageResult<PathBuf> {
        self.name_to_path(storage_name)
    }

    fn url_for(&self, storage_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_name)
    }
}
