//! API route configuration.

use crate::api::handlers::{
    create_slug_handler, delete_slug_handler, list_slugs_handler, resolve_slug_handler,
    update_slug_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Slug routes.
///
/// # Endpoints
///
/// - `GET    /slugs?userid=`     - List a user's slugs
/// - `POST   /slugs`             - Create a slug
/// - `PUT    /slugs`             - Update a slug (scoped to its owner)
/// - `DELETE /slugs?userid=&id=` - Delete a slug (scoped to its owner)
/// - `GET    /slug?token=`       - Resolve a token and record a hit
pub fn slug_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/slugs",
            get(list_slugs_handler)
                .post(create_slug_handler)
                .put(update_slug_handler)
                .delete(delete_slug_handler),
        )
        .route("/slug", get(resolve_slug_handler))
}
