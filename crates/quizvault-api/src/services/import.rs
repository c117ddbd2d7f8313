//! Bank import
//!
//! An import document is validated, sanitized and persisted as one unit: the
//! bank and every question land in a single store transaction or nothing does.

use quizvault_core::models::{Actor, ImportSummary, NewBank, SanitizedQuestion};
use quizvault_core::sanitize::{sanitize_bank_config, sanitize_question};
use quizvault_core::{validate_import_document, AppError, ValidationIssue};
use quizvault_db::BankStore;
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Clone)]
pub struct ImportService {
    banks: Arc<dyn BankStore>,
}

impl ImportService {
    pub fn new(banks: Arc<dyn BankStore>) -> Self {
        Self { banks }
    }

    /// Import a bank owned by `actor`. The bank is always created as a draft.
    #[tracing::instrument(skip(self, payload), fields(actor_id = %actor.id))]
    pub async fn import(
        &self,
        payload: &JsonValue,
        actor: &Actor,
    ) -> Result<ImportSummary, AppError> {
        let document = validate_import_document(payload)?;

        let config = sanitize_bank_config(document.bank);
        if is_blank_markup(&config.title) {
            return Err(AppError::validation("title is required"));
        }

        let questions: Vec<SanitizedQuestion> = document
            .questions
            .iter()
            .enumerate()
            .map(|(position, spec)| sanitize_question(spec, position))
            .collect();
        check_sanitized_prompts(&questions)?;

        let question_count = questions.len();
        let new_bank = NewBank::from_config(config, actor.id);
        let bank = self
            .banks
            .create_bank_with_questions(new_bank, questions)
            .await?;

        tracing::info!(
            target: "audit",
            event = "bank.import",
            actor_id = %actor.id,
            bank_id = %bank.id,
            question_count,
            "Question bank imported"
        );

        Ok(ImportSummary {
            bank_id: bank.id,
            title: bank.title,
            question_count,
        })
    }
}

/// A prompt that was nothing but disallowed markup is empty once sanitized
fn check_sanitized_prompts(questions: &[SanitizedQuestion]) -> Result<(), AppError> {
    let issues: Vec<ValidationIssue> = questions
        .iter()
        .enumerate()
        .filter(|(_, q)| is_blank_markup(&q.prompt))
        .map(|(i, _)| ValidationIssue::new(i + 1, "prompt is empty after sanitization"))
        .collect();

    if issues.is_empty() {
        return Ok(());
    }

    Err(AppError::validation_with_details(
        format!("{} question(s) failed validation", issues.len()),
        issues,
    ))
}

/// True when sanitized markup renders nothing, e.g. `<p> </p>`.
/// An image that kept its `src` counts as content.
fn is_blank_markup(html: &str) -> bool {
    let mut tag: Option<String> = None;
    let mut in_quotes = false;
    let mut text = String::new();
    for c in html.chars() {
        match tag.as_mut() {
            None if c == '<' => tag = Some(String::new()),
            None => text.push(c),
            Some(current) if c == '>' && !in_quotes => {
                if is_image_with_source(current) {
                    return false;
                }
                tag = None;
            }
            Some(current) => {
                if c == '"' {
                    in_quotes = !in_quotes;
                }
                // Attribute values are dropped, only names are kept
                if !in_quotes && c != '"' {
                    current.push(c);
                }
            }
        }
    }
    text.replace("&nbsp;", " ").trim().is_empty()
}

/// `tag` is the inside of a tag with attribute values removed, e.g. `img src= alt=`
fn is_image_with_source(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    let mut parts = tag.split_whitespace();
    parts.next().map(|name| name.trim_end_matches('/')) == Some("img")
        && parts.any(|attr| attr == "src=" || attr == "src")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizvault_core::models::{ActorRole, BankStatus};
    use quizvault_core::ErrorMetadata;
    use quizvault_db::InMemoryBankStore;
    use serde_json::json;
    use uuid::Uuid;

    fn service() -> (ImportService, InMemoryBankStore) {
        let store = InMemoryBankStore::new();
        (ImportService::new(Arc::new(store.clone())), store)
    }

    fn actor() -> Actor {
        Actor::new(Uuid::new_v4(), ActorRole::Editor)
    }

    fn question(prompt: &str) -> JsonValue {
        json!({
            "type": "SINGLE_CHOICE",
            "prompt": prompt,
            "options": ["A", "B"],
            "correctAnswer": "A",
            "feedback": ""
        })
    }

    #[tokio::test]
    async fn test_empty_bank_import() {
        let (service, store) = service();
        let actor = actor();
        let doc = json!({ "version": "1.0", "bank": { "title": "T" }, "questions": [] });

        let summary = service.import(&doc, &actor).await.unwrap();

        assert_eq!(summary.title, "T");
        assert_eq!(summary.question_count, 0);
        assert_eq!(store.bank_count(), 1);

        let bank = store.get_bank(summary.bank_id).await.unwrap().unwrap();
        assert_eq!(bank.question_count, 10);
        assert_eq!(bank.owner_id, actor.id);
        assert_eq!(bank.status, BankStatus::Draft);
    }

    #[tokio::test]
    async fn test_unsupported_version_creates_nothing() {
        let (service, store) = service();
        let doc = json!({ "version": "2.0", "bank": { "title": "T" }, "questions": [] });

        let err = service.import(&doc, &actor()).await.unwrap_err();

        assert_eq!(err.client_message(), "unsupported import format version");
        assert_eq!(store.bank_count(), 0);
    }

    #[tokio::test]
    async fn test_too_many_questions_creates_nothing() {
        let (service, store) = service();
        let questions: Vec<JsonValue> = (0..501).map(|i| question(&format!("Q{}", i))).collect();
        let doc = json!({ "version": "1.0", "bank": { "title": "T" }, "questions": questions });

        let err = service.import(&doc, &actor()).await.unwrap_err();

        assert!(err.client_message().contains("500"));
        assert_eq!(store.bank_count(), 0);
        assert_eq!(store.question_count(), 0);
    }

    #[tokio::test]
    async fn test_question_insert_failure_rolls_back() {
        let (service, store) = service();
        store.fail_question_inserts(true);
        let doc = json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": [question("One"), question("Two")]
        });

        let err = service.import(&doc, &actor()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(store.bank_count(), 0);
        assert_eq!(store.question_count(), 0);
    }

    #[tokio::test]
    async fn test_content_is_sanitized_before_persisting() {
        let (service, store) = service();
        let doc = json!({
            "version": "1.0",
            "bank": { "title": "<strong>Safe</strong><script>x()</script>", "description": "<em onclick=\"y()\">d</em>" },
            "questions": [question("<p>Hi<img src=x onerror=alert(1)></p>")]
        });

        let summary = service.import(&doc, &actor()).await.unwrap();
        let bank = store.get_bank(summary.bank_id).await.unwrap().unwrap();
        let questions = store.list_questions(summary.bank_id).await.unwrap();

        assert_eq!(bank.title, "<strong>Safe</strong>");
        assert_eq!(bank.description.as_deref(), Some("<em>d</em>"));
        assert!(!questions[0].prompt.contains("onerror"));
        assert_eq!(questions[0].correct_answer, json!("opt1"));
    }

    #[tokio::test]
    async fn test_prompt_empty_after_sanitization_is_rejected() {
        let (service, store) = service();
        let doc = json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": [question("Fine"), question("<script>only()</script>")]
        });

        let err = service.import(&doc, &actor()).await.unwrap_err();

        assert_eq!(err.details().len(), 1);
        assert_eq!(err.details()[0].index, 2);
        assert_eq!(store.bank_count(), 0);
    }

    #[test]
    fn test_is_blank_markup() {
        assert!(is_blank_markup(""));
        assert!(is_blank_markup("<p> </p>"));
        assert!(is_blank_markup("<p>&nbsp;</p>"));
        assert!(!is_blank_markup("<p>x</p>"));
        assert!(!is_blank_markup("2 &lt; 3"));
        assert!(!is_blank_markup(r#"<img src="https://cdn.example.com/x.png" alt="Identify">"#));
        assert!(!is_blank_markup(r#"<p><img alt="x" src="https://cdn.example.com/x.png"></p>"#));
        assert!(is_blank_markup(r#"<img alt="Identify">"#));
        assert!(is_blank_markup(r#"<img alt="not a src=x > here">"#));
    }

    #[tokio::test]
    async fn test_image_only_prompt_is_accepted() {
        let (service, store) = service();
        let doc = json!({
            "version": "1.0",
            "bank": { "title": "T" },
            "questions": [question(r#"<img src="https://cdn.example.com/flag.png" alt="Identify">"#)]
        });

        let summary = service.import(&doc, &actor()).await.unwrap();
        let questions = store.list_questions(summary.bank_id).await.unwrap();

        assert_eq!(summary.question_count, 1);
        assert!(questions[0].prompt.contains("src=\"https://cdn.example.com/flag.png\""));
    }
}
