//! Quizvault Processing Library
//!
//! Post-storage checks and transforms for uploaded files:
//! - [`gatekeeper`]: magic-byte verification against the claimed content type
//! - [`image`]: best-effort downscale and re-encode of accepted images

pub mod gatekeeper;
#[cfg(feature = "image")]
pub mod image;

pub use gatekeeper::{signature_for, verify_file_signature, FileSignature, GatekeeperError};
#[cfg(feature = "image")]
pub use self::image::{normalize_image, NormalizeOutcome};
