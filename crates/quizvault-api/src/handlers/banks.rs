use crate::auth::CurrentActor;
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::{ExportService, ImportService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Import a question bank document. The body is taken untyped so every
/// structural problem is reported by the document validator, not by serde.
pub async fn import_bank(
    State(service): State<ImportService>,
    CurrentActor(actor): CurrentActor,
    ValidatedJson(payload): ValidatedJson<JsonValue>,
) -> Result<impl IntoResponse, HttpAppError> {
    let summary = service.import(&payload, &actor).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn export_bank(
    State(service): State<ExportService>,
    CurrentActor(actor): CurrentActor,
    Path(bank_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let document = service.export(bank_id, &actor).await?;
    Ok(Json(document))
}
