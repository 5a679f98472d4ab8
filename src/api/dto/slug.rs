//! DTOs for slug endpoints.
//!
//! Wire field names (`redirect`, `uid`, `userid`) match records and clients
//! from earlier deployments; camelCase aliases are accepted on input.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{NewSlug, Slug};

/// Slug as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugResponse {
    pub id: String,
    pub slug: String,
    pub redirect: String,
    pub uid: String,
}

impl From<Slug> for SlugResponse {
    fn from(slug: Slug) -> Self {
        Self {
            id: slug.id.to_hex(),
            slug: slug.slug,
            redirect: slug.domain,
            uid: slug.user_id,
        }
    }
}

/// Body of `POST /slugs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSlugRequest {
    #[validate(length(min = 1, max = 256, message = "slug must be 1-256 characters"))]
    pub slug: String,

    #[validate(length(min = 1, max = 2048, message = "redirect must be 1-2048 characters"))]
    pub redirect: String,

    #[serde(alias = "userId")]
    #[validate(length(min = 1, max = 128, message = "uid must be 1-128 characters"))]
    pub uid: String,
}

impl From<CreateSlugRequest> for NewSlug {
    fn from(req: CreateSlugRequest) -> Self {
        Self {
            user_id: req.uid,
            slug: req.slug,
            domain: req.redirect,
        }
    }
}

/// Body of `PUT /slugs`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSlugRequest {
    pub id: String,

    #[validate(length(min = 1, max = 256, message = "slug must be 1-256 characters"))]
    pub slug: String,

    #[validate(length(min = 1, max = 2048, message = "redirect must be 1-2048 characters"))]
    pub redirect: String,

    #[serde(alias = "userId")]
    #[validate(length(min = 1, max = 128, message = "uid must be 1-128 characters"))]
    pub uid: String,
}

/// Query of `GET /slugs`.
#[derive(Debug, Deserialize, Validate)]
pub struct ListSlugsQuery {
    #[serde(rename = "userid", alias = "userId")]
    #[validate(length(min = 1, max = 128, message = "userid is required"))]
    pub user_id: String,
}

/// Query of `GET /slug`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveSlugQuery {
    #[serde(alias = "slug")]
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
}

/// Query of `DELETE /slugs`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteSlugQuery {
    #[serde(rename = "userid", alias = "userId")]
    #[validate(length(min = 1, max = 128, message = "userid is required"))]
    pub user_id: String,

    pub id: String,
}
