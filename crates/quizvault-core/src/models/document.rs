//! Import/export document shapes (format version "1.0")

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::bank::BankConfig;
use super::question::{Question, QuestionType};

/// A structurally valid import document. Only produced by
/// [`crate::validation::validate_import_document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDocument {
    pub version: String,
    pub bank: BankConfig,
    pub questions: Vec<QuestionSpec>,
}

/// One question as carried in a document. `options` and `correct_answer` are
/// opaque per-type payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(default)]
    pub prompt_image: Option<String>,
    pub options: JsonValue,
    pub correct_answer: JsonValue,
    pub feedback: String,
    #[serde(default)]
    pub feedback_image: Option<String>,
    #[serde(default)]
    pub reference_link: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
}

impl From<Question> for QuestionSpec {
    fn from(question: Question) -> Self {
        QuestionSpec {
            question_type: question.question_type,
            prompt: question.prompt,
            prompt_image: question.prompt_image,
            options: question.options,
            correct_answer: question.correct_answer,
            feedback: question.feedback,
            feedback_image: question.feedback_image,
            reference_link: question.reference_link,
            order: Some(question.sort_order),
        }
    }
}

/// Exported bank, accepted as-is by the import validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub bank: BankConfig,
    pub questions: Vec<QuestionSpec>,
}

/// Result of a successful import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub bank_id: Uuid,
    pub title: String,
    /// Number of questions actually created (not the bank's target count)
    pub question_count: usize,
}
