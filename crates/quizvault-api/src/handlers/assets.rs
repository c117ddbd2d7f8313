use crate::auth::CurrentActor;
use crate::error::HttpAppError;
use crate::services::UploadService;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Accept one image in the multipart field `file`
pub async fn upload_asset(
    State(service): State<UploadService>,
    CurrentActor(actor): CurrentActor,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let file = extract_multipart_file(multipart).await?;
    let asset = service.upload(file, &actor).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}
