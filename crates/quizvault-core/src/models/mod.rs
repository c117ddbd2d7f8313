pub mod actor;
pub mod asset;
pub mod bank;
pub mod document;
pub mod question;

pub use actor::{Actor, ActorRole};
pub use asset::UploadedAsset;
pub use bank::{BankConfig, BankStatus, FeedbackTiming, NewBank, QuestionBank};
pub use document::{ExportDocument, ImportDocument, ImportSummary, QuestionSpec};
pub use question::{Question, QuestionType, SanitizedQuestion};
