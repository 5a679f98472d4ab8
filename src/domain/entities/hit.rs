//! Hit event recorded each time a slug is resolved.

use chrono::{DateTime, Utc};

use super::Slug;

/// Append-only log entry holding a snapshot of the resolved slug.
///
/// The snapshot is a copy: later edits or deletion of the slug record do not
/// change historical hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitEvent {
    pub slug: Slug,
    pub hit_at: DateTime<Utc>,
}

impl HitEvent {
    pub fn new(slug: Slug, hit_at: DateTime<Utc>) -> Self {
        Self { slug, hit_at }
    }
}
