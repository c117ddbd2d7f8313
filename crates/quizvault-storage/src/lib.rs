//! Quizvault Storage Library
//!
//! Durable storage for uploaded assets.
//!
//! # Storage names
//!
//! Every stored file gets a generated name of the form
//! `{unix_nanos}-{32 hex chars}.{ext}`. Caller-supplied filenames are never
//! used as names, and names must not contain `..`, `/` or `\`. Name generation
//! lives in the `keys` module.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::{extension_for, generate_storage_name};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
