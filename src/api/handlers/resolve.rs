//! Handler for public slug resolution.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use validator::Validate;

use crate::api::dto::slug::{ResolveSlugQuery, SlugResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a token to its slug and records a hit.
///
/// # Endpoint
///
/// `GET /slug?token={token}`
///
/// The response carries the redirect target; the caller performs the redirect.
///
/// # Errors
///
/// Returns 400 Bad Request if no slug carries the token.
/// Returns 500 if the lookup or hit logging fails.
pub async fn resolve_slug_handler(
    State(state): State<AppState>,
    query: Result<Query<ResolveSlugQuery>, QueryRejection>,
) -> Result<Json<SlugResponse>, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let slug = state.slug_service.resolve_slug(&query.token).await?;

    Ok(Json(slug.into()))
}
