//! Validation modules

pub mod document;

pub use document::validate_import_document;
