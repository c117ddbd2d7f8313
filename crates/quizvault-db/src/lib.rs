//! Quizvault Database Layer
//!
//! Persistence for question banks and their questions. Services depend on the
//! [`BankStore`] trait; [`BankRepository`] is the PostgreSQL implementation.

pub mod db;

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

pub use db::bank::BankRepository;
pub use db::store::BankStore;
pub use db::transaction::with_transaction;

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::InMemoryBankStore;
