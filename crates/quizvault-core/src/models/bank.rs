use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_PASSING_SCORE, DEFAULT_QUESTION_COUNT, DEFAULT_RANDOM_ANSWERS,
    DEFAULT_RANDOM_QUESTIONS, DEFAULT_TIME_LIMIT,
};

/// When quiz-takers see per-question feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "feedback_timing", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackTiming {
    Immediate,
    #[default]
    End,
    Never,
}

/// Publication lifecycle of a bank. `Draft` is the lowest-visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "bank_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Bank configuration as it appears in import/export documents.
///
/// Every field except `title` may be absent on import; absent fields take the
/// documented defaults when the bank is created (see [`NewBank::from_config`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankConfig {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time_limit: Option<i32>,
    #[serde(default)]
    pub random_questions: Option<bool>,
    #[serde(default)]
    pub random_answers: Option<bool>,
    #[serde(default)]
    pub passing_score: Option<i32>,
    #[serde(default)]
    pub feedback_timing: Option<FeedbackTiming>,
    #[serde(default)]
    pub question_count: Option<i32>,
    #[serde(default)]
    pub max_attempts: Option<i32>,
}

/// Persisted question bank row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct QuestionBank {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub time_limit: i32,
    pub random_questions: bool,
    pub random_answers: bool,
    pub passing_score: i32,
    pub feedback_timing: FeedbackTiming,
    pub question_count: i32,
    pub max_attempts: i32,
    pub status: BankStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionBank {
    /// Bank configuration in document form, with every field populated
    pub fn to_config(&self) -> BankConfig {
        BankConfig {
            title: self.title.clone(),
            description: self.description.clone(),
            time_limit: Some(self.time_limit),
            random_questions: Some(self.random_questions),
            random_answers: Some(self.random_answers),
            passing_score: Some(self.passing_score),
            feedback_timing: Some(self.feedback_timing),
            question_count: Some(self.question_count),
            max_attempts: Some(self.max_attempts),
        }
    }
}

/// Insert payload for a bank. There is no status field: new banks are always drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBank {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub time_limit: i32,
    pub random_questions: bool,
    pub random_answers: bool,
    pub passing_score: i32,
    pub feedback_timing: FeedbackTiming,
    pub question_count: i32,
    pub max_attempts: i32,
}

impl NewBank {
    /// Resolve a document's bank configuration, filling absent fields with defaults
    pub fn from_config(config: BankConfig, owner_id: Uuid) -> Self {
        NewBank {
            owner_id,
            title: config.title,
            description: config.description,
            time_limit: config.time_limit.unwrap_or(DEFAULT_TIME_LIMIT),
            random_questions: config.random_questions.unwrap_or(DEFAULT_RANDOM_QUESTIONS),
            random_answers: config.random_answers.unwrap_or(DEFAULT_RANDOM_ANSWERS),
            passing_score: config.passing_score.unwrap_or(DEFAULT_PASSING_SCORE),
            feedback_timing: config.feedback_timing.unwrap_or_default(),
            question_count: config.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
            max_attempts: config.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bank_applies_defaults() {
        let config: BankConfig = serde_json::from_value(serde_json::json!({ "title": "T" })).unwrap();
        let bank = NewBank::from_config(config, Uuid::nil());

        assert_eq!(bank.title, "T");
        assert_eq!(bank.description, None);
        assert_eq!(bank.time_limit, 0);
        assert!(bank.random_questions);
        assert!(bank.random_answers);
        assert_eq!(bank.passing_score, 80);
        assert_eq!(bank.feedback_timing, FeedbackTiming::End);
        assert_eq!(bank.question_count, 10);
        assert_eq!(bank.max_attempts, 0);
    }

    #[test]
    fn test_new_bank_keeps_explicit_values() {
        let config: BankConfig = serde_json::from_value(serde_json::json!({
            "title": "Chemistry",
            "timeLimit": 30,
            "randomQuestions": false,
            "passingScore": 65,
            "feedbackTiming": "IMMEDIATE",
            "maxAttempts": 3
        }))
        .unwrap();
        let bank = NewBank::from_config(config, Uuid::nil());

        assert_eq!(bank.time_limit, 30);
        assert!(!bank.random_questions);
        assert!(bank.random_answers);
        assert_eq!(bank.passing_score, 65);
        assert_eq!(bank.feedback_timing, FeedbackTiming::Immediate);
        assert_eq!(bank.max_attempts, 3);
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        assert_eq!(
            serde_json::to_value(BankStatus::Draft).unwrap(),
            serde_json::json!("DRAFT")
        );
        assert_eq!(BankStatus::default(), BankStatus::Draft);
    }
}
