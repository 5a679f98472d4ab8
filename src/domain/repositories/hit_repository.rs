//! Repository trait for hit events.

use crate::domain::entities::{HitEvent, SlugId};
use crate::error::StoreError;
use async_trait::async_trait;

/// Append-only access to the hit log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Appends a hit event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity or query failures.
    async fn insert(&self, hit: HitEvent) -> Result<(), StoreError>;

    /// Counts recorded hits, optionally for a single slug id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity or query failures.
    async fn count(&self, slug_id: Option<SlugId>) -> Result<u64, StoreError>;
}
