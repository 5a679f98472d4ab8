//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod resolve;
pub mod slugs;

pub use health::health_handler;
pub use resolve::resolve_slug_handler;
pub use slugs::{create_slug_handler, delete_slug_handler, list_slugs_handler, update_slug_handler};
