use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Closed set of question kinds accepted by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "question_type", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    FillBlank,
    Ordering,
    Matching,
}

impl QuestionType {
    /// The type allow-list, in declaration order
    pub const ALL: [QuestionType; 7] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::FillBlank,
        QuestionType::Ordering,
        QuestionType::Matching,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "SINGLE_CHOICE",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::ShortAnswer => "SHORT_ANSWER",
            QuestionType::FillBlank => "FILL_BLANK",
            QuestionType::Ordering => "ORDERING",
            QuestionType::Matching => "MATCHING",
        }
    }

    /// Exact, case-sensitive lookup against the allow-list
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl Display for QuestionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Persisted question row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Question {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub question_type: QuestionType,
    pub prompt: String,
    pub prompt_image: Option<String>,
    pub options: JsonValue,
    pub correct_answer: JsonValue,
    pub feedback: String,
    pub feedback_image: Option<String>,
    pub reference_link: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A question that has passed validation and sanitization and is safe to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedQuestion {
    pub question_type: QuestionType,
    pub prompt: String,
    pub prompt_image: Option<String>,
    pub options: JsonValue,
    pub correct_answer: JsonValue,
    pub feedback: String,
    pub feedback_image: Option<String>,
    pub reference_link: Option<String>,
    pub sort_order: i32,
}
