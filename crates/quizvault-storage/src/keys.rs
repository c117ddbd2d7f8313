//! Storage name generation
//!
//! Names combine a nanosecond timestamp with 128 bits from the OS CSPRNG, so
//! they are unguessable and do not collide in practice.

use chrono::Utc;
use rand::RngCore;

/// Fallback extension when neither the filename nor the content type gives one
pub const DEFAULT_EXTENSION: &str = "bin";

const MAX_EXTENSION_LEN: usize = 10;

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
const PNG_EXTENSIONS: &[&str] = &["png"];
const GIF_EXTENSIONS: &[&str] = &["gif"];
const WEBP_EXTENSIONS: &[&str] = &["webp"];

/// Extensions accepted for a known image content type; the first is canonical
fn extensions_for_content_type(content_type: &str) -> Option<&'static [&'static str]> {
    match content_type.to_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some(JPEG_EXTENSIONS),
        "image/png" => Some(PNG_EXTENSIONS),
        "image/gif" => Some(GIF_EXTENSIONS),
        "image/webp" => Some(WEBP_EXTENSIONS),
        _ => None,
    }
}

/// Choose the extension for a stored file.
///
/// The original filename's extension is kept if it is 1 to 10 ASCII
/// alphanumerics (lowercased) and, for a known content type, is one of that
/// type's extensions. Otherwise the content type decides, and `bin` is the
/// last resort.
pub fn extension_for(original_filename: Option<&str>, content_type: &str) -> String {
    let known = extensions_for_content_type(content_type);

    let from_filename = original_filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_ascii_lowercase)
        .filter(|ext| known.map_or(true, |allowed| allowed.contains(&ext.as_str())));

    from_filename
        .or_else(|| known.map(|allowed| allowed[0].to_string()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Generate a fresh storage name: `{unix_nanos}-{32 hex chars}.{ext}`
pub fn generate_storage_name(original_filename: Option<&str>, content_type: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();

    let mut random = [0u8; 16];
    rand::rng().fill_bytes(&mut random);

    format!(
        "{}-{}.{}",
        nanos,
        hex::encode(random),
        extension_for(original_filename, content_type)
    )
}
