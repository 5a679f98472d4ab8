//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/slugs`, `/slug` - Slug management and resolution (see [`crate::api::routes`])
//! - `GET /health`     - Store health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, method, and header
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes with tracing and CORS applied, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::slug_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/slugs/` reaches `/slugs`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
