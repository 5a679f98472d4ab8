//! Slug entities: the public view, the persisted record, and mutation inputs.

use chrono::{DateTime, Utc};

use super::SlugId;

/// Public view of a slug: a short token mapped to a redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug {
    pub id: SlugId,
    pub slug: String,
    pub domain: String,
    pub user_id: String,
}

/// Persisted slug with server-side timestamps.
///
/// `updated_at >= created_at` holds for every record produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugRecord {
    pub id: SlugId,
    pub slug: String,
    pub domain: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SlugRecord {
    /// Builds a fresh record with a newly generated id, stamped at `now`.
    pub fn create(new_slug: NewSlug, now: DateTime<Utc>) -> Self {
        Self {
            id: SlugId::generate(),
            slug: new_slug.slug,
            domain: new_slug.domain,
            user_id: new_slug.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Strips timestamps to produce the public view.
    pub fn to_slug(&self) -> Slug {
        Slug {
            id: self.id,
            slug: self.slug.clone(),
            domain: self.domain.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl From<SlugRecord> for Slug {
    fn from(record: SlugRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug,
            domain: record.domain,
            user_id: record.user_id,
        }
    }
}

/// Input for creating a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlug {
    pub user_id: String,
    pub slug: String,
    pub domain: String,
}

/// Field updates applied by a scoped slug update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugChanges {
    pub slug: String,
    pub domain: String,
    pub updated_at: DateTime<Utc>,
}
