use serde::{Deserialize, Serialize};

/// An uploaded image that passed the gatekeeper and now lives in durable storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    /// Generated name; never derived from the caller-supplied filename
    pub storage_name: String,
    pub url: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Whether the normalizer replaced the accepted bytes
    pub normalized: bool,
}
