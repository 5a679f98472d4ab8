//! Document store gateway.
//!
//! Translates the named slug operations used by the policy engine into
//! filtered repository calls. Every call is bounded by the configured
//! operation timeout; the gateway never retries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::entities::{HitEvent, Slug, SlugChanges, SlugId, SlugRecord};
use crate::domain::filter::SlugFilter;
use crate::domain::repositories::{HitRepository, SlugRepository};
use crate::error::StoreError;

/// Default bound for a single data operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Named, timeout-bounded operations over the slug and hit collections.
#[derive(Clone)]
pub struct StoreGateway {
    slugs: Arc<dyn SlugRepository>,
    hits: Arc<dyn HitRepository>,
    operation_timeout: Duration,
}

impl StoreGateway {
    pub fn new(
        slugs: Arc<dyn SlugRepository>,
        hits: Arc<dyn HitRepository>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            slugs,
            hits,
            operation_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.operation_timeout, "Store operation timed out");
                Err(StoreError::Timeout {
                    operation,
                    timeout: self.operation_timeout,
                })
            }
        }
    }

    pub async fn insert_slug_record(&self, record: SlugRecord) -> Result<(), StoreError> {
        self.bounded("insert_slug_record", self.slugs.insert(record)).await
    }

    /// Returns matching records in insertion order; an empty result is not an error.
    pub async fn find_slug_records(
        &self,
        filter: SlugFilter,
    ) -> Result<Vec<SlugRecord>, StoreError> {
        self.bounded("find_slug_records", self.slugs.find(filter)).await
    }

    pub async fn find_slug_records_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<SlugRecord>, StoreError> {
        self.find_slug_records(SlugFilter::new().with_user(user_id)).await
    }

    /// Returns the last record carrying `token`, or `None` when nothing matches.
    ///
    /// Tokens are not unique; with several matches the most recently inserted wins.
    pub async fn find_slug_record_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SlugRecord>, StoreError> {
        let mut records = self.find_slug_records(SlugFilter::new().with_slug(token)).await?;

        if records.len() > 1 {
            tracing::debug!(token, matches = records.len(), "Token shared by several slugs");
        }

        Ok(records.pop())
    }

    /// Counts a user's records with `created_at >= cutoff`.
    pub async fn count_user_records_since(
        &self,
        user_id: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let filter = SlugFilter::new().with_user(user_id).created_since(cutoff);
        self.bounded("count_user_records_since", self.slugs.count(filter)).await
    }

    /// Updates the record matching both `id` and `user_id`, stamping `updated_at`.
    ///
    /// Returns the number of matched records; zero is not an error.
    pub async fn update_slug_record(
        &self,
        id: SlugId,
        user_id: &str,
        new_slug: String,
        new_domain: String,
    ) -> Result<u64, StoreError> {
        let filter = SlugFilter::new().with_id(id).with_user(user_id);
        let changes = SlugChanges {
            slug: new_slug,
            domain: new_domain,
            updated_at: Utc::now(),
        };
        self.bounded("update_slug_record", self.slugs.update(filter, changes)).await
    }

    /// Deletes the record matching both `id` and `user_id`.
    ///
    /// Returns the number of removed records; zero is not an error.
    pub async fn delete_slug_record(&self, id: SlugId, user_id: &str) -> Result<u64, StoreError> {
        let filter = SlugFilter::new().with_id(id).with_user(user_id);
        self.bounded("delete_slug_record", self.slugs.delete(filter)).await
    }

    pub async fn insert_hit_event(
        &self,
        slug: Slug,
        hit_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.bounded("insert_hit_event", self.hits.insert(HitEvent::new(slug, hit_at))).await
    }

    pub async fn count_hits(&self, slug_id: Option<SlugId>) -> Result<u64, StoreError> {
        self.bounded("count_hits", self.hits.count(slug_id)).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.bounded("ping", self.slugs.ping()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewSlug;
    use crate::domain::repositories::{MockHitRepository, MockSlugRepository};

    fn record(slug: &str, domain: &str) -> SlugRecord {
        SlugRecord::create(
            NewSlug {
                user_id: "u1".to_string(),
                slug: slug.to_string(),
                domain: domain.to_string(),
            },
            Utc::now(),
        )
    }

    fn gateway(slugs: MockSlugRepository, hits: MockHitRepository) -> StoreGateway {
        StoreGateway::new(Arc::new(slugs), Arc::new(hits), DEFAULT_OPERATION_TIMEOUT)
    }

    #[tokio::test]
    async fn test_find_by_token_returns_last_match() {
        let mut slugs = MockSlugRepository::new();
        let first = record("abc", "https://first.com");
        let second = record("abc", "https://second.com");
        let matches = vec![first, second.clone()];

        slugs
            .expect_find()
            .withf(|filter| filter.slug.as_deref() == Some("abc") && filter.user_id.is_none())
            .times(1)
            .returning(move |_| Ok(matches.clone()));

        let found = gateway(slugs, MockHitRepository::new())
            .find_slug_record_by_token("abc")
            .await
            .unwrap();

        assert_eq!(found, Some(second));
    }

    #[tokio::test]
    async fn test_find_by_token_empty() {
        let mut slugs = MockSlugRepository::new();
        slugs.expect_find().times(1).returning(|_| Ok(vec![]));

        let found = gateway(slugs, MockHitRepository::new())
            .find_slug_record_by_token("missing")
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_scopes_filter_by_owner() {
        let id = SlugId::generate();
        let mut slugs = MockSlugRepository::new();
        slugs
            .expect_update()
            .withf(move |filter, changes| {
                filter.id == Some(id)
                    && filter.user_id.as_deref() == Some("u1")
                    && filter.slug.is_none()
                    && changes.slug == "new"
                    && changes.domain == "https://new.com"
            })
            .times(1)
            .returning(|_, _| Ok(0));

        let matched = gateway(slugs, MockHitRepository::new())
            .update_slug_record(id, "u1", "new".to_string(), "https://new.com".to_string())
            .await
            .unwrap();

        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn test_delete_scopes_filter_by_owner() {
        let id = SlugId::generate();
        let mut slugs = MockSlugRepository::new();
        slugs
            .expect_delete()
            .withf(move |filter| filter.id == Some(id) && filter.user_id.as_deref() == Some("u2"))
            .times(1)
            .returning(|_| Ok(1));

        let removed = gateway(slugs, MockHitRepository::new())
            .delete_slug_record(id, "u2")
            .await
            .unwrap();

        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn test_count_since_builds_window_filter() {
        let cutoff = Utc::now();
        let mut slugs = MockSlugRepository::new();
        slugs
            .expect_count()
            .withf(move |filter| {
                filter.user_id.as_deref() == Some("u1") && filter.created_since == Some(cutoff)
            })
            .times(1)
            .returning(|_| Ok(7));

        let count = gateway(slugs, MockHitRepository::new())
            .count_user_records_since("u1", cutoff)
            .await
            .unwrap();

        assert_eq!(count, 7);
    }

    #[tokio::test]
    async fn test_insert_hit_embeds_snapshot() {
        let slug = record("abc", "https://x.com").to_slug();
        let expected = slug.clone();
        let mut hits = MockHitRepository::new();
        hits.expect_insert()
            .withf(move |hit| hit.slug == expected)
            .times(1)
            .returning(|_| Ok(()));

        gateway(MockSlugRepository::new(), hits)
            .insert_hit_event(slug, Utc::now())
            .await
            .unwrap();
    }

    struct StalledRepository;

    #[async_trait::async_trait]
    impl SlugRepository for StalledRepository {
        async fn insert(&self, _record: SlugRecord) -> Result<(), StoreError> {
            std::future::pending().await
        }
        async fn find(&self, _filter: SlugFilter) -> Result<Vec<SlugRecord>, StoreError> {
            std::future::pending().await
        }
        async fn count(&self, _filter: SlugFilter) -> Result<u64, StoreError> {
            std::future::pending().await
        }
        async fn update(
            &self,
            _filter: SlugFilter,
            _changes: SlugChanges,
        ) -> Result<u64, StoreError> {
            std::future::pending().await
        }
        async fn delete(&self, _filter: SlugFilter) -> Result<u64, StoreError> {
            std::future::pending().await
        }
        async fn ping(&self) -> Result<(), StoreError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_store_times_out() {
        let gateway = StoreGateway::new(
            Arc::new(StalledRepository),
            Arc::new(MockHitRepository::new()),
            Duration::from_secs(30),
        );

        let result = gateway.find_slug_records_by_user("u1").await;

        assert!(matches!(
            result,
            Err(StoreError::Timeout {
                operation: "find_slug_records",
                ..
            })
        ));
    }
}
