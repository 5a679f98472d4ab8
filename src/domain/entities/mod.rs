//! Core domain entities.
//!
//! Entities are plain data structures; persistence shapes live in the
//! infrastructure layer and wire shapes in [`crate::api::dto`].
//!
//! - [`Slug`] - Public view of a short token and its redirect target
//! - [`SlugRecord`] - Persisted slug with `created_at` / `updated_at`
//! - [`HitEvent`] - Snapshot of a resolved slug with its hit timestamp
//! - [`SlugId`] - ObjectId-compatible identifier

pub mod hit;
pub mod slug;
pub mod slug_id;

pub use hit::HitEvent;
pub use slug::{NewSlug, Slug, SlugChanges, SlugRecord};
pub use slug_id::{ParseSlugIdError, SlugId};
