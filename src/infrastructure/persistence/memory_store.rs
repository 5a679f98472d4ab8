//! In-process document store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{HitEvent, SlugChanges, SlugId, SlugRecord};
use crate::domain::filter::SlugFilter;
use crate::domain::repositories::{HitRepository, SlugRepository};
use crate::error::StoreError;

/// Store keeping slugs and hits in insertion-ordered vectors.
///
/// Used for local development (`STORE_BACKEND=memory`) and HTTP tests. Data
/// does not survive a restart.
#[derive(Default)]
pub struct MemoryStore {
    slugs: RwLock<Vec<SlugRecord>>,
    hits: RwLock<Vec<HitEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store (data is not persisted)");
        Self::default()
    }

    /// Snapshot of the hit log, oldest first.
    pub async fn hits(&self) -> Vec<HitEvent> {
        self.hits.read().await.clone()
    }
}

#[async_trait]
impl SlugRepository for MemoryStore {
    async fn insert(&self, record: SlugRecord) -> Result<(), StoreError> {
        self.slugs.write().await.push(record);
        Ok(())
    }

    async fn find(&self, filter: SlugFilter) -> Result<Vec<SlugRecord>, StoreError> {
        let slugs = self.slugs.read().await;
        Ok(slugs.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn count(&self, filter: SlugFilter) -> Result<u64, StoreError> {
        let slugs = self.slugs.read().await;
        let count = slugs.iter().filter(|r| filter.matches(r)).count();
        Ok(count as u64)
    }

    async fn update(&self, filter: SlugFilter, changes: SlugChanges) -> Result<u64, StoreError> {
        let mut slugs = self.slugs.write().await;
        let mut matched = 0;

        for record in slugs.iter_mut().filter(|r| filter.matches(r)) {
            record.slug = changes.slug.clone();
            record.domain = changes.domain.clone();
            record.updated_at = changes.updated_at.max(record.created_at);
            matched += 1;
        }

        Ok(matched)
    }

    async fn delete(&self, filter: SlugFilter) -> Result<u64, StoreError> {
        let mut slugs = self.slugs.write().await;
        let before = slugs.len();
        slugs.retain(|r| !filter.matches(r));
        Ok((before - slugs.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl HitRepository for MemoryStore {
    async fn insert(&self, hit: HitEvent) -> Result<(), StoreError> {
        self.hits.write().await.push(hit);
        Ok(())
    }

    async fn count(&self, slug_id: Option<SlugId>) -> Result<u64, StoreError> {
        let hits = self.hits.read().await;
        let count = hits
            .iter()
            .filter(|h| slug_id.is_none_or(|id| h.slug.id == id))
            .count();
        Ok(count as u64)
    }
}
