//! Repository trait for slug records.

use crate::domain::entities::{SlugChanges, SlugRecord};
use crate::domain::filter::SlugFilter;
use crate::error::StoreError;
use async_trait::async_trait;

/// Filter-based access to the slug collection.
///
/// Implementations own the physical record shape and query construction.
/// Sequence-returning operations yield records in insertion order.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSlugRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugRepository: Send + Sync {
    /// Persists one new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity or query failures.
    async fn insert(&self, record: SlugRecord) -> Result<(), StoreError>;

    /// Returns every record matching `filter`, possibly none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity or query failures.
    async fn find(&self, filter: SlugFilter) -> Result<Vec<SlugRecord>, StoreError>;

    /// Counts records matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity or query failures.
    async fn count(&self, filter: SlugFilter) -> Result<u64, StoreError>;

    /// Applies `changes` to every record matching `filter` and returns how many
    /// matched. Matching nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity or query failures.
    async fn update(&self, filter: SlugFilter, changes: SlugChanges) -> Result<u64, StoreError>;

    /// Physically removes records matching `filter` and returns how many were
    /// removed. Matching nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity or query failures.
    async fn delete(&self, filter: SlugFilter) -> Result<u64, StoreError>;

    /// Cheap connectivity probe used by health checks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
