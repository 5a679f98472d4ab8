//! PostgreSQL implementation of the slug repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{SlugChanges, SlugId, SlugRecord};
use crate::domain::filter::SlugFilter;
use crate::domain::repositories::SlugRepository;
use crate::error::StoreError;

const SELECT_COLUMNS: &str = "SELECT id, slug, redirect, uid, created_at, updated_at FROM slugs";

/// Row shape of the `slugs` table.
#[derive(Debug, sqlx::FromRow)]
struct SlugRow {
    id: String,
    slug: String,
    redirect: String,
    uid: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SlugRow> for SlugRecord {
    type Error = StoreError;

    fn try_from(row: SlugRow) -> Result<Self, Self::Error> {
        let id: SlugId = row
            .id
            .trim()
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("slugs.id: {e}")))?;

        Ok(SlugRecord {
            id,
            slug: row.slug,
            domain: row.redirect,
            user_id: row.uid,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Appends `WHERE` clauses for every set field of `filter`.
///
/// All values are bound parameters.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &SlugFilter) {
    builder.push(" WHERE TRUE");

    if let Some(id) = filter.id {
        builder.push(" AND id = ").push_bind(id.to_hex());
    }
    if let Some(user_id) = &filter.user_id {
        builder.push(" AND uid = ").push_bind(user_id.clone());
    }
    if let Some(slug) = &filter.slug {
        builder.push(" AND slug = ").push_bind(slug.clone());
    }
    if let Some(cutoff) = filter.created_since {
        builder.push(" AND created_at >= ").push_bind(cutoff);
    }
}

/// PostgreSQL repository for slug records.
///
/// Queries are assembled with [`QueryBuilder`] from a [`SlugFilter`]; the
/// `seq` column provides insertion order.
pub struct PgSlugRepository {
    pool: Arc<PgPool>,
}

impl PgSlugRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlugRepository for PgSlugRepository {
    async fn insert(&self, record: SlugRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO slugs (id, slug, redirect, uid, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.to_hex())
        .bind(record.slug)
        .bind(record.domain)
        .bind(record.user_id)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find(&self, filter: SlugFilter) -> Result<Vec<SlugRecord>, StoreError> {
        let mut builder = QueryBuilder::new(SELECT_COLUMNS);
        push_filter(&mut builder, &filter);
        builder.push(" ORDER BY seq");

        let rows: Vec<SlugRow> = builder
            .build_query_as()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(SlugRecord::try_from).collect()
    }

    async fn count(&self, filter: SlugFilter) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM slugs");
        push_filter(&mut builder, &filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn update(&self, filter: SlugFilter, changes: SlugChanges) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::new("UPDATE slugs SET slug = ");
        builder
            .push_bind(changes.slug)
            .push(", redirect = ")
            .push_bind(changes.domain)
            .push(", updated_at = GREATEST(created_at, ")
            .push_bind(changes.updated_at)
            .push(")");
        push_filter(&mut builder, &filter);

        let result = builder.build().execute(self.pool.as_ref()).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, filter: SlugFilter) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::new("DELETE FROM slugs");
        push_filter(&mut builder, &filter);

        let result = builder.build().execute(self.pool.as_ref()).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
