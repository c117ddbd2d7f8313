//! Import, export and upload orchestration behind the HTTP handlers

pub mod export;
pub mod import;
pub mod upload;

pub use export::ExportService;
pub use import::ImportService;
pub use upload::UploadService;
