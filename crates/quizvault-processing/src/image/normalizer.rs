//! Best-effort image normalization
//!
//! Accepted images are decoded, downscaled to fit the configured bound and
//! re-encoded, which also drops embedded metadata. The result replaces the
//! stored file through an atomic rename. Any failure leaves the stored file as
//! it was.

use image::imageops::FilterType;
use image::{GenericImageView, ImageReader};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::encode::{encode, TargetFormat};
use super::resize::fit_within;

/// What happened to a stored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// Re-encoded (and possibly resized) in place
    Normalized {
        width: u32,
        height: u32,
        size_bytes: u64,
    },
    /// Left byte-for-byte as uploaded
    Unchanged { width: u32, height: u32 },
    /// Not a format the normalizer handles
    Skipped,
    /// Normalization failed; the stored file is untouched
    Failed { reason: String },
}

#[derive(Debug, thiserror::Error)]
enum NormalizeError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to replace file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("file has no parent directory")]
    NoParent,
}

/// Normalize a stored image on the blocking thread pool. Never returns an error.
#[tracing::instrument(skip_all, fields(path = %path.display(), content_type = %content_type))]
pub async fn normalize_image(path: &Path, content_type: &str, max_dimension: u32) -> NormalizeOutcome {
    let Some(format) = TargetFormat::from_content_type(content_type) else {
        tracing::debug!("Content type not normalized");
        return NormalizeOutcome::Skipped;
    };

    let owned_path: PathBuf = path.to_path_buf();
    let result =
        tokio::task::spawn_blocking(move || normalize_blocking(&owned_path, format, max_dimension))
            .await;

    let outcome = match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => NormalizeOutcome::Failed {
            reason: e.to_string(),
        },
        Err(join_error) => NormalizeOutcome::Failed {
            reason: format!("normalization task failed: {}", join_error),
        },
    };

    match &outcome {
        NormalizeOutcome::Failed { reason } => {
            tracing::warn!(reason = %reason, "Image normalization failed, keeping original");
        }
        other => {
            tracing::debug!(outcome = ?other, "Image normalization finished");
        }
    }

    outcome
}

fn normalize_blocking(
    path: &Path,
    format: TargetFormat,
    max_dimension: u32,
) -> Result<NormalizeOutcome, NormalizeError> {
    // Stored names keep the caller's extension, so sniff the format instead
    let (width, height) = ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    let target = fit_within(width, height, max_dimension);

    // GIFs may be animated; only touch them when they are too large
    if format == TargetFormat::Gif && target.is_none() {
        return Ok(NormalizeOutcome::Unchanged { width, height });
    }

    let mut img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;

    if let Some((new_width, new_height)) = target {
        tracing::debug!(
            width,
            height,
            new_width,
            new_height,
            "Downscaling image"
        );
        img = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
    }

    let encoded = encode(&img, format)?;
    replace_atomically(path, &encoded)?;

    let (width, height) = img.dimensions();
    Ok(NormalizeOutcome::Normalized {
        width,
        height,
        size_bytes: encoded.len() as u64,
    })
}

/// Write `data` to a sibling temp file and rename it over `path`
fn replace_atomically(path: &Path, data: &[u8]) -> Result<(), NormalizeError> {
    let parent = path.parent().ok_or(NormalizeError::NoParent)?;

    // Temp files are created owner-only; keep the stored file's mode
    let permissions = std::fs::metadata(path)?.permissions();

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(data)?;
    temp.as_file().set_permissions(permissions)?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;

    Ok(())
}
