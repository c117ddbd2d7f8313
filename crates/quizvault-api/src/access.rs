//! Export access predicate
//!
//! The exporter asks an [`AccessPolicy`] whether an actor may read a bank. A
//! denial is reported to the caller exactly like a missing bank.

use quizvault_core::models::{Actor, BankStatus, QuestionBank};

pub trait AccessPolicy: Send + Sync {
    fn can_export(&self, actor: &Actor, bank: &QuestionBank) -> bool;
}

/// Admins and owners can export anything; everyone else only published banks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAccessPolicy;

impl AccessPolicy for DefaultAccessPolicy {
    fn can_export(&self, actor: &Actor, bank: &QuestionBank) -> bool {
        actor.is_admin() || bank.owner_id == actor.id || bank.status == BankStatus::Published
    }
}
