//! In-memory [`BankStore`] for tests
//!
//! Mirrors the transactional contract of the PostgreSQL repository: a create
//! either lands completely or not at all. Failures can be injected to exercise
//! the rollback path.

use async_trait::async_trait;
use chrono::Utc;
use quizvault_core::models::{BankStatus, NewBank, Question, QuestionBank, SanitizedQuestion};
use quizvault_core::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::db::store::BankStore;

/// In-memory store for testing without a database
#[derive(Clone, Default)]
pub struct InMemoryBankStore {
    banks: Arc<Mutex<HashMap<Uuid, QuestionBank>>>,
    questions: Arc<Mutex<HashMap<Uuid, Vec<Question>>>>,
    fail_question_insert: Arc<AtomicBool>,
}

impl InMemoryBankStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following create fail after the bank row was staged,
    /// as if the question insert had failed inside the transaction
    pub fn fail_question_inserts(&self, fail: bool) {
        self.fail_question_insert.store(fail, Ordering::SeqCst);
    }

    /// Change a bank's status, e.g. to publish it
    pub fn set_status(&self, bank_id: Uuid, status: BankStatus) {
        if let Some(bank) = self.banks.lock().unwrap().get_mut(&bank_id) {
            bank.status = status;
            bank.updated_at = Utc::now();
        }
    }

    pub fn bank_count(&self) -> usize {
        self.banks.lock().unwrap().len()
    }

    pub fn question_count(&self) -> usize {
        self.questions.lock().unwrap().values().map(Vec::len).sum()
    }
}

#[async_trait]
impl BankStore for InMemoryBankStore {
    async fn create_bank_with_questions(
        &self,
        bank: NewBank,
        questions: Vec<SanitizedQuestion>,
    ) -> Result<QuestionBank, AppError> {
        let now = Utc::now();
        let created = QuestionBank {
            id: Uuid::new_v4(),
            owner_id: bank.owner_id,
            title: bank.title,
            description: bank.description,
            time_limit: bank.time_limit,
            random_questions: bank.random_questions,
            random_answers: bank.random_answers,
            passing_score: bank.passing_score,
            feedback_timing: bank.feedback_timing,
            question_count: bank.question_count,
            max_attempts: bank.max_attempts,
            status: BankStatus::Draft,
            created_at: now,
            updated_at: now,
        };

        let rows: Vec<Question> = questions
            .into_iter()
            .map(|q| Question {
                id: Uuid::new_v4(),
                bank_id: created.id,
                question_type: q.question_type,
                prompt: q.prompt,
                prompt_image: q.prompt_image,
                options: q.options,
                correct_answer: q.correct_answer,
                feedback: q.feedback,
                feedback_image: q.feedback_image,
                reference_link: q.reference_link,
                sort_order: q.sort_order,
                created_at: now,
            })
            .collect();

        if self.fail_question_insert.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "injected failure while inserting questions".to_string(),
            )));
        }

        // Lock order: banks, then questions
        let mut banks = self.banks.lock().unwrap();
        let mut questions = self.questions.lock().unwrap();
        banks.insert(created.id, created.clone());
        questions.insert(created.id, rows);

        Ok(created)
    }

    async fn get_bank(&self, id: Uuid) -> Result<Option<QuestionBank>, AppError> {
        Ok(self.banks.lock().unwrap().get(&id).cloned())
    }

    async fn list_questions(&self, bank_id: Uuid) -> Result<Vec<Question>, AppError> {
        let mut rows = self
            .questions
            .lock()
            .unwrap()
            .get(&bank_id)
            .cloned()
            .unwrap_or_default();
        // Stable sort keeps insertion order for equal sort_order
        rows.sort_by_key(|q| q.sort_order);
        Ok(rows)
    }
}
