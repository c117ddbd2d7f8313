//! Upload gatekeeper
//!
//! Verifies that a stored file's leading bytes match the signature registered
//! for its claimed content type. A file that fails verification, or cannot be
//! read, is deleted before the error is returned.

use quizvault_core::AppError;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// One fixed byte sequence expected at a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureRule {
    pub offset: usize,
    pub bytes: &'static [u8],
}

/// All rules that must hold for a content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    pub content_type: &'static str,
    pub rules: &'static [SignatureRule],
}

impl FileSignature {
    /// Number of leading bytes needed to evaluate every rule
    pub fn header_len(&self) -> usize {
        self.rules
            .iter()
            .map(|rule| rule.offset + rule.bytes.len())
            .max()
            .unwrap_or(0)
    }

    /// Whether `header` satisfies every rule. A header too short for a rule fails it.
    pub fn matches(&self, header: &[u8]) -> bool {
        self.rules.iter().all(|rule| {
            header
                .get(rule.offset..rule.offset + rule.bytes.len())
                .is_some_and(|window| window == rule.bytes)
        })
    }
}

/// Signature registry
pub static SIGNATURES: &[FileSignature] = &[
    FileSignature {
        content_type: "image/jpeg",
        rules: &[SignatureRule {
            offset: 0,
            bytes: &[0xFF, 0xD8, 0xFF],
        }],
    },
    FileSignature {
        content_type: "image/png",
        rules: &[SignatureRule {
            offset: 0,
            bytes: &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        }],
    },
    FileSignature {
        content_type: "image/gif",
        rules: &[SignatureRule {
            offset: 0,
            bytes: b"GIF8",
        }],
    },
    FileSignature {
        content_type: "image/webp",
        rules: &[
            SignatureRule {
                offset: 0,
                bytes: b"RIFF",
            },
            SignatureRule {
                offset: 8,
                bytes: b"WEBP",
            },
        ],
    },
];

/// Gatekeeper errors
#[derive(Debug, thiserror::Error)]
pub enum GatekeeperError {
    #[error("File content does not match declared type {content_type}")]
    SignatureMismatch { content_type: String },

    #[error("File could not be read for verification: {0}")]
    ReadFailed(#[from] std::io::Error),
}

impl From<GatekeeperError> for AppError {
    fn from(err: GatekeeperError) -> Self {
        match err {
            GatekeeperError::SignatureMismatch { content_type } => AppError::UploadRejected(
                format!("file content does not match declared type {}", content_type),
            ),
            GatekeeperError::ReadFailed(_) => {
                AppError::UploadRejected("file could not be verified".to_string())
            }
        }
    }
}

/// Normalize a content type for registry lookup: lowercase, parameters
/// stripped, `image/jpg` folded into `image/jpeg`
fn canonical_content_type(content_type: &str) -> String {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    match base.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        _ => base,
    }
}

/// Registered signature for a content type, if any
pub fn signature_for(content_type: &str) -> Option<&'static FileSignature> {
    let content_type = canonical_content_type(content_type);
    SIGNATURES
        .iter()
        .find(|signature| signature.content_type == content_type)
}

/// Read up to `len` leading bytes. Shorter files yield a shorter buffer.
async fn read_header(path: &Path, len: usize) -> std::io::Result<Vec<u8>> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut header = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        let read = file.read(&mut header[filled..]).await?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    header.truncate(filled);
    Ok(header)
}

async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Failed to delete rejected upload"
            );
        }
    }
}

/// Verify a stored file against its claimed content type.
///
/// Types without a registered signature pass unverified. On mismatch or read
/// failure the file is deleted.
#[tracing::instrument(skip_all, fields(path = %path.display(), content_type = %claimed_content_type))]
pub async fn verify_file_signature(
    path: &Path,
    claimed_content_type: &str,
) -> Result<(), GatekeeperError> {
    let Some(signature) = signature_for(claimed_content_type) else {
        tracing::debug!("No signature registered for content type, skipping verification");
        return Ok(());
    };

    let header = match read_header(path, signature.header_len()).await {
        Ok(header) => header,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read upload for verification");
            discard(path).await;
            return Err(GatekeeperError::ReadFailed(e));
        }
    };

    if !signature.matches(&header) {
        tracing::warn!(
            header_len = header.len(),
            "Upload signature mismatch, deleting file"
        );
        discard(path).await;
        return Err(GatekeeperError::SignatureMismatch {
            content_type: signature.content_type.to_string(),
        });
    }

    tracing::debug!("Upload signature verified");
    Ok(())
}
