use async_trait::async_trait;
use quizvault_core::models::{NewBank, Question, QuestionBank, SanitizedQuestion};
use quizvault_core::AppError;
use uuid::Uuid;

/// Transactional catalog store
#[async_trait]
pub trait BankStore: Send + Sync {
    /// Create a bank and all of its questions as one atomic unit.
    ///
    /// Either the bank and every question are persisted, or nothing is. The
    /// bank is always created as a draft.
    async fn create_bank_with_questions(
        &self,
        bank: NewBank,
        questions: Vec<SanitizedQuestion>,
    ) -> Result<QuestionBank, AppError>;

    /// Get a bank by ID
    async fn get_bank(&self, id: Uuid) -> Result<Option<QuestionBank>, AppError>;

    /// List a bank's questions in ascending sort order. Ties keep insertion order.
    async fn list_questions(&self, bank_id: Uuid) -> Result<Vec<Question>, AppError>;
}
