//! Handlers for slug management endpoints (list, create, update, delete).

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::dto::slug::{
    CreateSlugRequest, DeleteSlugQuery, ListSlugsQuery, SlugResponse, UpdateSlugRequest,
};
use crate::domain::entities::{Slug, SlugId};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every slug owned by a user, oldest first.
///
/// # Endpoint
///
/// `GET /slugs?userid={uid}`
///
/// # Errors
///
/// Returns 400 Bad Request if the user does not exist or `userid` is missing.
/// Returns 500 on store or identity provider failures.
pub async fn list_slugs_handler(
    State(state): State<AppState>,
    query: Result<Query<ListSlugsQuery>, QueryRejection>,
) -> Result<Json<Vec<SlugResponse>>, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let slugs = state.slug_service.list_slugs(&query.user_id).await?;

    Ok(Json(slugs.into_iter().map(SlugResponse::from).collect()))
}

/// Creates a slug.
///
/// # Endpoint
///
/// `POST /slugs`
///
/// # Request Body
///
/// ```json
/// { "slug": "abc", "redirect": "https://x.com", "uid": "u1" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": "65a1f0c2e4b0a1b2c3d4e5f6", "slug": "abc", "redirect": "https://x.com", "uid": "u1" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is invalid, the user does not exist,
/// or the user reached the creation limit.
/// Returns 500 on store or identity provider failures.
pub async fn create_slug_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSlugRequest>, JsonRejection>,
) -> Result<Json<SlugResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let slug = state.slug_service.create_slug(payload.into()).await?;

    Ok(Json(slug.into()))
}

/// Replaces token and redirect target of a slug owned by `uid`.
///
/// # Endpoint
///
/// `PUT /slugs`
///
/// # Behavior
///
/// The update is scoped to the (`id`, `uid`) pair. A pair that matches no
/// slug still returns 200.
///
/// # Errors
///
/// Returns 400 Bad Request if the body or id is invalid or the user does not exist.
/// Returns 500 on store or identity provider failures.
pub async fn update_slug_handler(
    State(state): State<AppState>,
    payload: Result<Json<UpdateSlugRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let id: SlugId = payload.id.parse()?;

    state
        .slug_service
        .update_slug(Slug {
            id,
            slug: payload.slug,
            domain: payload.redirect,
            user_id: payload.uid,
        })
        .await?;

    Ok(Json(json!({})))
}

/// Physically deletes a slug owned by `userid`.
///
/// # Endpoint
///
/// `DELETE /slugs?userid={uid}&id={id}`
///
/// # Behavior
///
/// Idempotent: deleting a missing (`id`, `userid`) pair returns 200.
///
/// # Errors
///
/// Returns 400 Bad Request if the id is malformed or the user does not exist.
/// Returns 500 on store or identity provider failures.
pub async fn delete_slug_handler(
    State(state): State<AppState>,
    query: Result<Query<DeleteSlugQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let id: SlugId = query.id.parse()?;

    state.slug_service.delete_slug(id, &query.user_id).await?;

    Ok(Json(json!({})))
}
