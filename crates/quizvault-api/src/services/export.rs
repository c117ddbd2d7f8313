//! Bank export

use chrono::Utc;
use quizvault_core::constants::IMPORT_FORMAT_VERSION;
use quizvault_core::models::{Actor, ExportDocument, QuestionSpec};
use quizvault_core::AppError;
use quizvault_db::BankStore;
use std::sync::Arc;
use uuid::Uuid;

use crate::access::AccessPolicy;

const BANK_NOT_FOUND: &str = "question bank not found";

#[derive(Clone)]
pub struct ExportService {
    banks: Arc<dyn BankStore>,
    access: Arc<dyn AccessPolicy>,
}

impl ExportService {
    pub fn new(banks: Arc<dyn BankStore>, access: Arc<dyn AccessPolicy>) -> Self {
        Self { banks, access }
    }

    /// Export a bank as a version "1.0" document.
    ///
    /// A bank the actor may not read is reported as not found, so callers
    /// cannot learn about other users' drafts.
    #[tracing::instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn export(&self, bank_id: Uuid, actor: &Actor) -> Result<ExportDocument, AppError> {
        let bank = self
            .banks
            .get_bank(bank_id)
            .await?
            .ok_or_else(|| AppError::NotFound(BANK_NOT_FOUND.to_string()))?;

        if !self.access.can_export(actor, &bank) {
            tracing::warn!(
                target: "audit",
                event = "bank.export.denied",
                actor_id = %actor.id,
                bank_id = %bank.id,
                "Export denied"
            );
            return Err(AppError::NotFound(BANK_NOT_FOUND.to_string()));
        }

        let questions = self.banks.list_questions(bank.id).await?;

        tracing::info!(
            target: "audit",
            event = "bank.export",
            actor_id = %actor.id,
            bank_id = %bank.id,
            question_count = questions.len(),
            "Question bank exported"
        );

        Ok(ExportDocument {
            version: IMPORT_FORMAT_VERSION.to_string(),
            exported_at: Utc::now(),
            bank: bank.to_config(),
            questions: questions.into_iter().map(QuestionSpec::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::DefaultAccessPolicy;
    use crate::services::ImportService;
    use quizvault_core::models::{ActorRole, BankStatus};
    use quizvault_core::{validate_import_document, ErrorMetadata};
    use quizvault_db::InMemoryBankStore;
    use serde_json::json;

    struct Fixture {
        store: InMemoryBankStore,
        import: ImportService,
        export: ExportService,
    }

    fn fixture() -> Fixture {
        let store = InMemoryBankStore::new();
        let banks: Arc<dyn BankStore> = Arc::new(store.clone());
        Fixture {
            store,
            import: ImportService::new(banks.clone()),
            export: ExportService::new(banks, Arc::new(DefaultAccessPolicy)),
        }
    }

    fn editor() -> Actor {
        Actor::new(Uuid::new_v4(), ActorRole::Editor)
    }

    fn document() -> serde_json::Value {
        json!({
            "version": "1.0",
            "bank": {
                "title": "Capitals",
                "description": "European capitals",
                "timeLimit": 15,
                "randomQuestions": false,
                "passingScore": 70,
                "feedbackTiming": "IMMEDIATE",
                "questionCount": 3,
                "maxAttempts": 2
            },
            "questions": [
                {
                    "type": "SINGLE_CHOICE",
                    "prompt": "<p>Capital of France?</p>",
                    "options": ["Paris", "Lyon"],
                    "correctAnswer": "Paris",
                    "feedback": "<em>Paris</em>",
                    "referenceLink": "https://en.wikipedia.org/wiki/Paris"
                },
                {
                    "type": "TRUE_FALSE",
                    "prompt": "Berlin is in Germany",
                    "options": ["True", "False"],
                    "correctAnswer": true,
                    "feedback": ""
                },
                {
                    "type": "SHORT_ANSWER",
                    "prompt": "Capital of Italy?",
                    "options": { "caseSensitive": false },
                    "correctAnswer": ["Rome", "Roma"],
                    "feedback": ""
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_round_trip_preserves_content() {
        let f = fixture();
        let actor = editor();

        let first = f.import.import(&document(), &actor).await.unwrap();
        let exported = f.export.export(first.bank_id, &actor).await.unwrap();
        assert_eq!(exported.version, "1.0");

        let exported_json = serde_json::to_value(&exported).unwrap();
        assert!(validate_import_document(&exported_json).is_ok());

        let second = f.import.import(&exported_json, &actor).await.unwrap();
        let reexported = f.export.export(second.bank_id, &actor).await.unwrap();

        assert_eq!(reexported.bank, exported.bank);
        assert_eq!(reexported.questions, exported.questions);
        assert_eq!(exported.questions.len(), 3);
        assert_eq!(exported.bank.passing_score, Some(70));
        assert_eq!(exported.questions[0].prompt, "<p>Capital of France?</p>");
    }

    #[tokio::test]
    async fn test_questions_follow_sort_order() {
        let f = fixture();
        let actor = editor();
        let doc = json!({
            "version": "1.0",
            "bank": { "title": "Ordered" },
            "questions": [
                { "type": "SHORT_ANSWER", "prompt": "second", "options": {}, "correctAnswer": "b", "feedback": "", "order": 2 },
                { "type": "SHORT_ANSWER", "prompt": "first", "options": {}, "correctAnswer": "a", "feedback": "", "order": 1 }
            ]
        });

        let summary = f.import.import(&doc, &actor).await.unwrap();
        let exported = f.export.export(summary.bank_id, &actor).await.unwrap();

        let prompts: Vec<&str> = exported.questions.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_denied_export_looks_like_missing_bank() {
        let f = fixture();
        let summary = f.import.import(&document(), &editor()).await.unwrap();

        let denied = f.export.export(summary.bank_id, &editor()).await.unwrap_err();
        let missing = f.export.export(Uuid::new_v4(), &editor()).await.unwrap_err();

        assert!(matches!(denied, AppError::NotFound(_)));
        assert_eq!(denied.client_message(), missing.client_message());
        assert_eq!(denied.http_status_code(), 404);
    }

    #[tokio::test]
    async fn test_published_bank_is_exportable_by_anyone() {
        let f = fixture();
        let summary = f.import.import(&document(), &editor()).await.unwrap();
        f.store.set_status(summary.bank_id, BankStatus::Published);

        assert!(f.export.export(summary.bank_id, &editor()).await.is_ok());
    }

    #[tokio::test]
    async fn test_admin_can_export_drafts() {
        let f = fixture();
        let summary = f.import.import(&document(), &editor()).await.unwrap();
        let admin = Actor::new(Uuid::new_v4(), ActorRole::Admin);

        assert!(f.export.export(summary.bank_id, &admin).await.is_ok());
    }
}
