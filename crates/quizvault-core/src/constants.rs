//! Shared constants for the import/export document format and bank defaults.

/// The only import/export document version accepted. No migration between versions.
pub const IMPORT_FORMAT_VERSION: &str = "1.0";

/// Upper bound on questions in a single import document.
pub const MAX_IMPORT_QUESTIONS: usize = 500;

// BankConfig defaults applied by the importer when a field is absent.
pub const DEFAULT_TIME_LIMIT: i32 = 0;
pub const DEFAULT_RANDOM_QUESTIONS: bool = true;
pub const DEFAULT_RANDOM_ANSWERS: bool = true;
pub const DEFAULT_PASSING_SCORE: i32 = 80;
pub const DEFAULT_QUESTION_COUNT: i32 = 10;
pub const DEFAULT_MAX_ATTEMPTS: i32 = 0;

/// Longest side, in pixels, an uploaded image may keep before it is downscaled.
pub const DEFAULT_IMAGE_MAX_DIMENSION: u32 = 2048;

/// Re-encode targets used by the image normalizer.
pub const JPEG_QUALITY: u8 = 82;
pub const WEBP_QUALITY: f32 = 80.0;
