//! Image normalization

pub mod encode;
pub mod normalizer;
pub mod resize;

pub use normalizer::{normalize_image, NormalizeOutcome};
pub use resize::fit_within;
