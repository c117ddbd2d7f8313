//! Asset upload
//!
//! Order matters: the bytes are written under a generated name, verified
//! against the claimed type (and deleted on mismatch), and only then handed
//! to the best-effort normalizer.

use quizvault_core::models::{Actor, UploadedAsset};
use quizvault_core::AppError;
use quizvault_processing::{normalize_image, verify_file_signature, NormalizeOutcome};
use quizvault_storage::{generate_storage_name, Storage};
use std::sync::Arc;

use crate::state::UploadConfig;
use crate::utils::upload::{
    normalize_mime_type, validate_content_type, validate_file_size, MultipartFile,
};

#[derive(Clone)]
pub struct UploadService {
    storage: Arc<dyn Storage>,
    config: UploadConfig,
}

impl UploadService {
    pub fn new(storage: Arc<dyn Storage>, config: UploadConfig) -> Self {
        Self { storage, config }
    }

    #[tracing::instrument(skip(self, file), fields(actor_id = %actor.id, content_type = %file.content_type, size = file.data.len()))]
    pub async fn upload(
        &self,
        file: MultipartFile,
        actor: &Actor,
    ) -> Result<UploadedAsset, AppError> {
        validate_content_type(&file.content_type, &self.config.allowed_content_types)?;
        validate_file_size(file.data.len(), self.config.max_file_size)?;
        let content_type = normalize_mime_type(&file.content_type);

        let storage_name = generate_storage_name(file.filename.as_deref(), &content_type);
        let url = self.storage.write(&storage_name, &file.data).await?;
        let path = self.storage.path_for(&storage_name)?;

        if let Err(e) = verify_file_signature(&path, &content_type).await {
            tracing::warn!(
                target: "audit",
                event = "asset.rejected",
                actor_id = %actor.id,
                storage_name = %storage_name,
                content_type = %content_type,
                reason = %e,
                "Upload rejected"
            );
            return Err(e.into());
        }

        let outcome = if self.config.normalize_enabled {
            normalize_image(&path, &content_type, self.config.image_max_dimension).await
        } else {
            NormalizeOutcome::Skipped
        };

        let (width, height, normalized) = match outcome {
            NormalizeOutcome::Normalized { width, height, .. } => (Some(width), Some(height), true),
            NormalizeOutcome::Unchanged { width, height } => (Some(width), Some(height), false),
            NormalizeOutcome::Skipped | NormalizeOutcome::Failed { .. } => (None, None, false),
        };

        let size_bytes = self.storage.content_length(&storage_name).await?;

        tracing::info!(
            target: "audit",
            event = "asset.upload",
            actor_id = %actor.id,
            storage_name = %storage_name,
            content_type = %content_type,
            size_bytes,
            normalized,
            "Asset uploaded"
        );

        Ok(UploadedAsset {
            storage_name,
            url,
            content_type,
            size_bytes,
            width,
            height,
            normalized,
        })
    }
}
