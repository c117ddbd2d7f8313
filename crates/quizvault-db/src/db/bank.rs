use async_trait::async_trait;
use quizvault_core::models::{NewBank, Question, QuestionBank, SanitizedQuestion};
use quizvault_core::AppError;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::store::BankStore;
use super::transaction::with_transaction;

const BANK_COLUMNS: &str = "id, owner_id, title, description, time_limit, random_questions, \
     random_answers, passing_score, feedback_timing, question_count, max_attempts, status, \
     created_at, updated_at";

const QUESTION_COLUMNS: &str = "id, bank_id, question_type, prompt, prompt_image, options, \
     correct_answer, feedback, feedback_image, reference_link, sort_order, created_at";

/// Repository for question banks and their questions
#[derive(Clone)]
pub struct BankRepository {
    pool: PgPool,
}

impl BankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the bank row. `status` is left to the column default (`DRAFT`).
    async fn insert_bank(conn: &mut PgConnection, bank: &NewBank) -> Result<QuestionBank, AppError> {
        let query = format!(
            r#"
            INSERT INTO question_banks (
                owner_id, title, description, time_limit, random_questions, random_answers,
                passing_score, feedback_timing, question_count, max_attempts
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            BANK_COLUMNS
        );

        let created = sqlx::query_as::<Postgres, QuestionBank>(&query)
            .bind(bank.owner_id)
            .bind(&bank.title)
            .bind(&bank.description)
            .bind(bank.time_limit)
            .bind(bank.random_questions)
            .bind(bank.random_answers)
            .bind(bank.passing_score)
            .bind(bank.feedback_timing)
            .bind(bank.question_count)
            .bind(bank.max_attempts)
            .fetch_one(conn)
            .await?;

        Ok(created)
    }

    /// Insert all questions with a single multi-row statement
    async fn insert_questions(
        conn: &mut PgConnection,
        bank_id: Uuid,
        questions: &[SanitizedQuestion],
    ) -> Result<u64, AppError> {
        if questions.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO questions (bank_id, question_type, prompt, prompt_image, options, \
             correct_answer, feedback, feedback_image, reference_link, sort_order) ",
        );
        builder.push_values(questions, |mut row, q| {
            row.push_bind(bank_id)
                .push_bind(q.question_type)
                .push_bind(&q.prompt)
                .push_bind(&q.prompt_image)
                .push_bind(&q.options)
                .push_bind(&q.correct_answer)
                .push_bind(&q.feedback)
                .push_bind(&q.feedback_image)
                .push_bind(&q.reference_link)
                .push_bind(q.sort_order);
        });

        let result = builder.build().execute(conn).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl BankStore for BankRepository {
    #[tracing::instrument(
        skip(self, bank, questions),
        fields(db.table = "question_banks", db.operation = "insert", question_count = questions.len())
    )]
    async fn create_bank_with_questions(
        &self,
        bank: NewBank,
        questions: Vec<SanitizedQuestion>,
    ) -> Result<QuestionBank, AppError> {
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let created = Self::insert_bank(&mut **tx, &bank).await?;
                let inserted = Self::insert_questions(&mut **tx, created.id, &questions).await?;

                tracing::debug!(
                    bank_id = %created.id,
                    questions = inserted,
                    "Bank and questions inserted"
                );

                Ok(created)
            })
        })
        .await
    }

    #[tracing::instrument(skip(self), fields(db.table = "question_banks", db.operation = "select", db.record_id = %id))]
    async fn get_bank(&self, id: Uuid) -> Result<Option<QuestionBank>, AppError> {
        let query = format!("SELECT {} FROM question_banks WHERE id = $1", BANK_COLUMNS);
        let bank = sqlx::query_as::<Postgres, QuestionBank>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bank)
    }

    #[tracing::instrument(skip(self), fields(db.table = "questions", db.operation = "select", db.record_id = %bank_id))]
    async fn list_questions(&self, bank_id: Uuid) -> Result<Vec<Question>, AppError> {
        let query = format!(
            "SELECT {} FROM questions WHERE bank_id = $1 ORDER BY sort_order ASC, seq ASC",
            QUESTION_COLUMNS
        );
        let questions = sqlx::query_as::<Postgres, Question>(&query)
            .bind(bank_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(questions)
    }
}
