//! Database repositories
//
// Store abstraction consumed by the services
pub mod store;
//
// PostgreSQL bank repository
pub mod bank;
//
// Transaction utilities
pub mod transaction;
