//! Store filter used to select slug records for find, update, delete and count.

use chrono::{DateTime, Utc};

use super::entities::{SlugId, SlugRecord};

/// Conjunctive predicate over slug records.
///
/// Every `Some` field must match; an empty filter matches all records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugFilter {
    pub id: Option<SlugId>,
    pub user_id: Option<String>,
    pub slug: Option<String>,
    pub created_since: Option<DateTime<Utc>>,
}

impl SlugFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: SlugId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Restricts to records with `created_at >= cutoff`.
    pub fn created_since(mut self, cutoff: DateTime<Utc>) -> Self {
        self.created_since = Some(cutoff);
        self
    }

    /// Evaluates the filter against a record in memory.
    pub fn matches(&self, record: &SlugRecord) -> bool {
        self.id.is_none_or(|id| record.id == id)
            && self
                .user_id
                .as_deref()
                .is_none_or(|uid| record.user_id == uid)
            && self.slug.as_deref().is_none_or(|slug| record.slug == slug)
            && self
                .created_since
                .is_none_or(|cutoff| record.created_at >= cutoff)
    }
}
