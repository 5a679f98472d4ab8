//! PostgreSQL implementation of the hit repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{HitEvent, SlugId};
use crate::domain::repositories::HitRepository;
use crate::error::StoreError;

/// PostgreSQL repository for the append-only hit log.
///
/// The slug snapshot is flattened into columns of the `hits` row.
pub struct PgHitRepository {
    pool: Arc<PgPool>,
}

impl PgHitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HitRepository for PgHitRepository {
    async fn insert(&self, hit: HitEvent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO hits (slug_id, slug, redirect, uid, hit_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(hit.slug.id.to_hex())
        .bind(hit.slug.slug)
        .bind(hit.slug.domain)
        .bind(hit.slug.user_id)
        .bind(hit.hit_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count(&self, slug_id: Option<SlugId>) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM hits WHERE ($1::text IS NULL OR slug_id = $1)",
        )
        .bind(slug_id.map(|id| id.to_hex()))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
