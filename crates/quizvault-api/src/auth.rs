//! Acting-user extraction
//!
//! Authentication happens upstream. The gateway forwards the authenticated
//! identity as `X-User-Id` and `X-User-Role`; this extractor only parses them.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use quizvault_core::models::{Actor, ActorRole};
use quizvault_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The actor a request is performed on behalf of
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

// Read straight from the parts so it also works alongside Multipart
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers)
            .map(CurrentActor)
            .map_err(HttpAppError::from)
    }
}

fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, AppError> {
    let id = header_str(headers, USER_ID_HEADER)?
        .parse::<Uuid>()
        .map_err(|_| AppError::Unauthorized(format!("{} is not a valid UUID", USER_ID_HEADER)))?;

    let role = header_str(headers, USER_ROLE_HEADER)?
        .parse::<ActorRole>()
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    Ok(Actor::new(id, role))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", name)))
}
