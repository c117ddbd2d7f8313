//! Content sanitization
//!
//! Turns a validated [`QuestionSpec`] into a [`SanitizedQuestion`] that is safe
//! to persist and to render back to quiz-takers. All functions here are pure.

pub mod answers;
pub mod html;
pub mod url;

pub use crate::models::SanitizedQuestion;
pub use self::answers::canonicalize;
pub use self::html::sanitize_rich_text;
pub use self::url::sanitize_url;

use crate::models::{BankConfig, QuestionSpec};

/// Sanitize one question. `position` is its 0-based index in the document and
/// becomes the sort order when the question carries no explicit `order`.
pub fn sanitize_question(spec: &QuestionSpec, position: usize) -> SanitizedQuestion {
    let (options, correct_answer) =
        canonicalize(spec.question_type, &spec.options, &spec.correct_answer);

    SanitizedQuestion {
        question_type: spec.question_type,
        prompt: sanitize_rich_text(&spec.prompt),
        prompt_image: sanitize_url(spec.prompt_image.as_deref()),
        options,
        correct_answer,
        feedback: sanitize_rich_text(&spec.feedback),
        feedback_image: sanitize_url(spec.feedback_image.as_deref()),
        reference_link: sanitize_url(spec.reference_link.as_deref()),
        sort_order: spec
            .order
            .unwrap_or_else(|| i32::try_from(position).unwrap_or(i32::MAX)),
    }
}

/// Sanitize the free-text fields of a bank configuration
pub fn sanitize_bank_config(config: BankConfig) -> BankConfig {
    BankConfig {
        title: sanitize_rich_text(&config.title),
        description: config.description.as_deref().map(sanitize_rich_text),
        ..config
    }
}
