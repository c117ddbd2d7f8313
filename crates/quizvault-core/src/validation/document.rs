//! Import document validation
//!
//! Validates an untyped JSON payload in a single pass and produces either a
//! typed [`ImportDocument`] or a validation error:
//! - Top-level structure is checked fail-fast, one reason at a time
//! - Questions are then checked independently and every failure is collected,
//!   tagged with its 1-based position
//!
//! The per-type shape of `options` and `correctAnswer` is not checked here;
//! only their presence is.

use serde_json::{Map, Value as JsonValue};

use crate::constants::{IMPORT_FORMAT_VERSION, MAX_IMPORT_QUESTIONS};
use crate::error::{AppError, ValidationIssue};
use crate::models::{BankConfig, FeedbackTiming, ImportDocument, QuestionSpec, QuestionType};

type JsonObject = Map<String, JsonValue>;

/// Validate a raw import payload
pub fn validate_import_document(payload: &JsonValue) -> Result<ImportDocument, AppError> {
    let document = payload
        .as_object()
        .ok_or_else(|| AppError::validation("expected an object"))?;

    if document.get("version").and_then(JsonValue::as_str) != Some(IMPORT_FORMAT_VERSION) {
        return Err(AppError::validation("unsupported import format version"));
    }

    let bank = document
        .get("bank")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| AppError::validation("missing bank configuration"))?;

    let title = match bank.get("title").and_then(JsonValue::as_str) {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => return Err(AppError::validation("title is required")),
    };

    let questions = document
        .get("questions")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| AppError::validation("questions must be an array"))?;

    if questions.len() > MAX_IMPORT_QUESTIONS {
        return Err(AppError::validation(format!(
            "exceeds maximum of {} questions",
            MAX_IMPORT_QUESTIONS
        )));
    }

    let bank = parse_bank_config(bank, title)?;

    let mut issues = Vec::new();
    let mut specs = Vec::with_capacity(questions.len());
    for (position, question) in questions.iter().enumerate() {
        if let Some(spec) = check_question(position + 1, question, &mut issues) {
            specs.push(spec);
        }
    }

    if !issues.is_empty() {
        let mut failed: Vec<usize> = issues.iter().map(|issue| issue.index).collect();
        failed.dedup();
        return Err(AppError::validation_with_details(
            format!("{} question(s) failed validation", failed.len()),
            issues,
        ));
    }

    Ok(ImportDocument {
        version: IMPORT_FORMAT_VERSION.to_string(),
        bank,
        questions: specs,
    })
}

fn invalid_bank_field(field: &str) -> AppError {
    AppError::validation(format!("invalid bank configuration: {}", field))
}

/// Read an optional integer field, rejecting non-integers and out-of-range values.
/// `null` is treated as absent.
fn optional_int(
    bank: &JsonObject,
    field: &str,
    range: std::ops::RangeInclusive<i32>,
) -> Result<Option<i32>, AppError> {
    match bank.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .filter(|n| range.contains(n))
            .map(Some)
            .ok_or_else(|| invalid_bank_field(field)),
    }
}

fn optional_bool(bank: &JsonObject, field: &str) -> Result<Option<bool>, AppError> {
    match bank.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid_bank_field(field)),
    }
}

fn parse_bank_config(bank: &JsonObject, title: String) -> Result<BankConfig, AppError> {
    let description = match bank.get("description") {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(_) => return Err(invalid_bank_field("description")),
    };

    let feedback_timing = match bank.get("feedbackTiming") {
        None | Some(JsonValue::Null) => None,
        Some(value) => Some(
            serde_json::from_value::<FeedbackTiming>(value.clone())
                .map_err(|_| invalid_bank_field("feedbackTiming"))?,
        ),
    };

    Ok(BankConfig {
        title,
        description,
        time_limit: optional_int(bank, "timeLimit", 0..=i32::MAX)?,
        random_questions: optional_bool(bank, "randomQuestions")?,
        random_answers: optional_bool(bank, "randomAnswers")?,
        passing_score: optional_int(bank, "passingScore", 0..=100)?,
        feedback_timing,
        question_count: optional_int(bank, "questionCount", 0..=i32::MAX)?,
        max_attempts: optional_int(bank, "maxAttempts", 0..=i32::MAX)?,
    })
}

/// A field counts as present unless it is missing or `null`.
fn present(question: &JsonObject, field: &str) -> Option<JsonValue> {
    question.get(field).filter(|v| !v.is_null()).cloned()
}

fn optional_string(question: &JsonObject, field: &str) -> Option<String> {
    question
        .get(field)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

/// Check one question, recording every problem found. Returns the typed spec
/// only when the question has no problems.
fn check_question(
    index: usize,
    value: &JsonValue,
    issues: &mut Vec<ValidationIssue>,
) -> Option<QuestionSpec> {
    let Some(question) = value.as_object() else {
        issues.push(ValidationIssue::new(index, "question must be an object"));
        return None;
    };

    let question_type = match question.get("type").and_then(JsonValue::as_str) {
        Some(raw) => {
            let parsed = QuestionType::parse(raw);
            if parsed.is_none() {
                issues.push(ValidationIssue::new(
                    index,
                    format!("invalid question type \"{}\"", raw),
                ));
            }
            parsed
        }
        None => {
            issues.push(ValidationIssue::new(index, "invalid question type"));
            None
        }
    };

    let prompt = match question.get("prompt").and_then(JsonValue::as_str) {
        Some(prompt) if !prompt.trim().is_empty() => Some(prompt.to_string()),
        _ => {
            issues.push(ValidationIssue::new(index, "prompt is required"));
            None
        }
    };

    let feedback = match question.get("feedback") {
        Some(JsonValue::String(feedback)) => Some(feedback.clone()),
        _ => {
            issues.push(ValidationIssue::new(index, "feedback must be a string"));
            None
        }
    };

    let options = present(question, "options");
    if options.is_none() {
        issues.push(ValidationIssue::new(index, "options are required"));
    }

    let correct_answer = present(question, "correctAnswer");
    if correct_answer.is_none() {
        issues.push(ValidationIssue::new(index, "correctAnswer is required"));
    }

    match (question_type, prompt, feedback, options, correct_answer) {
        (Some(question_type), Some(prompt), Some(feedback), Some(options), Some(correct_answer)) => {
            Some(QuestionSpec {
                question_type,
                prompt,
                prompt_image: optional_string(question, "promptImage"),
                options,
                correct_answer,
                feedback,
                feedback_image: optional_string(question, "feedbackImage"),
                reference_link: optional_string(question, "referenceLink"),
                order: question
                    .get("order")
                    .and_then(JsonValue::as_i64)
                    .and_then(|n| i32::try_from(n).ok()),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_question() -> JsonValue {
        json!({
            "type": "SINGLE_CHOICE",
            "prompt": "<p>2 + 2?</p>",
            "options": ["3", "4"],
            "correctAnswer": "opt2",
            "feedback": ""
        })
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation { message, .. } => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_document_is_accepted() {
        let doc = validate_import_document(&json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": []
        }))
        .unwrap();

        assert_eq!(doc.bank.title, "T");
        assert!(doc.questions.is_empty());
        assert_eq!(doc.bank.question_count, None);
    }

    #[test]
    fn test_top_level_gates_in_order() {
        assert_eq!(
            message(validate_import_document(&json!([])).unwrap_err()),
            "expected an object"
        );
        assert_eq!(
            message(validate_import_document(&json!({ "version": "2.0" })).unwrap_err()),
            "unsupported import format version"
        );
        assert_eq!(
            message(validate_import_document(&json!({ "version": 1.0, "bank": {} })).unwrap_err()),
            "unsupported import format version"
        );
        assert_eq!(
            message(validate_import_document(&json!({ "version": "1.0", "bank": "x" })).unwrap_err()),
            "missing bank configuration"
        );
        assert_eq!(
            message(
                validate_import_document(&json!({ "version": "1.0", "bank": { "title": "   " } }))
                    .unwrap_err()
            ),
            "title is required"
        );
        assert_eq!(
            message(
                validate_import_document(
                    &json!({ "version": "1.0", "bank": { "title": "T" }, "questions": {} })
                )
                .unwrap_err()
            ),
            "questions must be an array"
        );
    }

    #[test]
    fn test_version_mismatch_wins_over_other_defects() {
        let err = validate_import_document(&json!({
            "version": "2.0",
            "bank": { "title": "" },
            "questions": "nope"
        }))
        .unwrap_err();
        assert_eq!(message(err), "unsupported import format version");
    }

    #[test]
    fn test_question_limit() {
        let questions: Vec<JsonValue> = (0..501).map(|_| valid_question()).collect();
        let err = validate_import_document(&json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": questions
        }))
        .unwrap_err();
        assert!(err.details().is_empty());
        assert!(message(err).contains("500"));

        let questions: Vec<JsonValue> = (0..500).map(|_| valid_question()).collect();
        let doc = validate_import_document(&json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": questions
        }))
        .unwrap();
        assert_eq!(doc.questions.len(), 500);
    }

    #[test]
    fn test_all_question_failures_are_collected() {
        let err = validate_import_document(&json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": [
                valid_question(),
                { "type": "ESSAY", "prompt": "p", "options": [], "correctAnswer": "a", "feedback": "" },
                { "type": "TRUE_FALSE", "prompt": "  ", "options": [], "correctAnswer": true, "feedback": "" },
                { "type": "SINGLE_CHOICE", "prompt": "p", "correctAnswer": "a", "feedback": "" },
                { "type": "SINGLE_CHOICE", "prompt": "p", "options": [], "correctAnswer": null, "feedback": "" },
                { "type": "SINGLE_CHOICE", "prompt": "p", "options": [], "correctAnswer": "a", "feedback": 3 }
            ]
        }))
        .unwrap_err();

        let indexes: Vec<usize> = err.details().iter().map(|d| d.index).collect();
        assert_eq!(indexes, vec![2, 3, 4, 5, 6]);
        assert!(err.details()[0].message.contains("invalid question type"));
        assert_eq!(err.details()[1].message, "prompt is required");
        assert_eq!(err.details()[2].message, "options are required");
        assert_eq!(err.details()[3].message, "correctAnswer is required");
        assert_eq!(err.details()[4].message, "feedback must be a string");
        assert_eq!(message(err), "5 question(s) failed validation");
    }

    #[test]
    fn test_multiple_failures_in_one_question_are_all_recorded() {
        let err = validate_import_document(&json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": [ { "type": "NOPE" }, "not an object" ]
        }))
        .unwrap_err();

        let issues = err.details();
        assert_eq!(issues.len(), 6);
        assert!(issues[..5].iter().all(|i| i.index == 1));
        assert_eq!(issues[5].index, 2);
        assert_eq!(issues[5].message, "question must be an object");
        assert_eq!(message(err), "2 question(s) failed validation");
    }

    #[test]
    fn test_bank_field_types_are_checked() {
        for (field, value) in [
            ("timeLimit", json!(-1)),
            ("maxAttempts", json!("3")),
            ("passingScore", json!(101)),
            ("randomQuestions", json!("yes")),
            ("feedbackTiming", json!("LATER")),
            ("description", json!(42)),
        ] {
            let mut bank = json!({ "title": "T" });
            bank[field] = value;
            let err = validate_import_document(&json!({
                "version": "1.0",
                "bank": bank,
                "questions": []
            }))
            .unwrap_err();
            assert_eq!(message(err), format!("invalid bank configuration: {}", field));
        }
    }

    #[test]
    fn test_null_bank_fields_are_absent() {
        let doc = validate_import_document(&json!({
            "version": "1.0",
            "bank": { "title": "T", "description": null, "timeLimit": null },
            "questions": []
        }))
        .unwrap();
        assert_eq!(doc.bank.description, None);
        assert_eq!(doc.bank.time_limit, None);
    }

    #[test]
    fn test_typed_question_fields() {
        let doc = validate_import_document(&json!({
            "version": "1.0",
            "bank": { "title": "T", "feedbackTiming": "NEVER" },
            "questions": [{
                "type": "TRUE_FALSE",
                "prompt": "Sky is blue",
                "options": ["true", "false"],
                "correctAnswer": true,
                "feedback": "",
                "promptImage": "https://cdn.example.com/sky.png",
                "referenceLink": 7,
                "order": 4
            }]
        }))
        .unwrap();

        assert_eq!(doc.bank.feedback_timing, Some(FeedbackTiming::Never));
        let q = &doc.questions[0];
        assert_eq!(q.question_type, QuestionType::TrueFalse);
        assert_eq!(q.prompt_image.as_deref(), Some("https://cdn.example.com/sky.png"));
        assert_eq!(q.reference_link, None);
        assert_eq!(q.order, Some(4));
    }
}
