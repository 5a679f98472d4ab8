//! Slug policy engine: creation limits, resolution, and owner-scoped mutations.

use chrono::{DateTime, TimeDelta, Utc};

use crate::application::services::IdentityGate;
use crate::domain::entities::{NewSlug, Slug, SlugId, SlugRecord};
use crate::domain::gateway::StoreGateway;
use crate::error::AppError;

/// Longest accepted creation window, in days.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Per-user creation cap over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationLimit {
    pub max_slugs: u64,
    pub window_days: i64,
}

impl CreationLimit {
    pub fn new(max_slugs: u64, window_days: i64) -> Self {
        Self {
            max_slugs,
            window_days,
        }
    }

    /// Window length, or `None` if `window_days` is outside `1..=MAX_WINDOW_DAYS`.
    pub fn window(&self) -> Option<TimeDelta> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return None;
        }
        TimeDelta::try_days(self.window_days)
    }

    /// Start of the window ending at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] for an out-of-range window.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
        self.window()
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "creation window of {} days is out of range",
                    self.window_days
                ))
            })
    }
}

impl Default for CreationLimit {
    fn default() -> Self {
        Self::new(30, 30)
    }
}

/// Service implementing the slug lifecycle.
///
/// Holds no mutable state of its own; all state lives in the store, so one
/// instance is shared by every request.
#[derive(Clone)]
pub struct SlugService {
    gateway: StoreGateway,
    identity: IdentityGate,
    limit: CreationLimit,
}

impl SlugService {
    pub fn new(gateway: StoreGateway, identity: IdentityGate, limit: CreationLimit) -> Self {
        Self {
            gateway,
            identity,
            limit,
        }
    }

    pub fn limit(&self) -> CreationLimit {
        self.limit
    }

    pub fn gateway(&self) -> &StoreGateway {
        &self.gateway
    }

    /// Creates a slug for an existing user under the creation limit.
    ///
    /// The count check and the insert are not atomic: concurrent creations by
    /// the same user may both pass the check and briefly exceed the cap.
    ///
    /// # Errors
    ///
    /// - [`AppError::UserNotFound`] if the owner does not exist
    /// - [`AppError::RateLimitExceeded`] if the user already created
    ///   `max_slugs` records inside the window; nothing is written
    /// - [`AppError::Store`] / [`AppError::IdentityProvider`] on backend failures
    pub async fn create_slug(&self, new_slug: NewSlug) -> Result<Slug, AppError> {
        self.identity.require_user(&new_slug.user_id).await?;

        let now = Utc::now();
        let cutoff = self.limit.cutoff(now)?;
        let count = self
            .gateway
            .count_user_records_since(&new_slug.user_id, cutoff)
            .await?;

        if count >= self.limit.max_slugs {
            tracing::info!(
                user_id = %new_slug.user_id,
                count,
                limit = self.limit.max_slugs,
                "Slug creation rejected by rate limit"
            );
            return Err(AppError::RateLimitExceeded {
                user_id: new_slug.user_id,
                limit: self.limit.max_slugs,
                window_days: self.limit.window_days,
            });
        }

        let record = SlugRecord::create(new_slug, now);
        let slug = record.to_slug();
        self.gateway.insert_slug_record(record).await?;

        tracing::info!(id = %slug.id, slug = %slug.slug, user_id = %slug.user_id, "Slug created");
        Ok(slug)
    }

    /// Resolves a public token to its slug and records a hit.
    ///
    /// A failure to record the hit fails the whole resolution even though the
    /// lookup succeeded.
    ///
    /// # Errors
    ///
    /// - [`AppError::SlugNotFound`] if no record carries `token`
    /// - [`AppError::Store`] on lookup or hit-logging failures
    pub async fn resolve_slug(&self, token: &str) -> Result<Slug, AppError> {
        let record = self
            .gateway
            .find_slug_record_by_token(token)
            .await?
            .ok_or_else(|| AppError::SlugNotFound {
                token: token.to_string(),
            })?;

        let slug = Slug::from(record);

        if let Err(e) = self.gateway.insert_hit_event(slug.clone(), Utc::now()).await {
            tracing::error!(error = %e, id = %slug.id, token, "Failed to record hit; resolution failed");
            return Err(e.into());
        }

        Ok(slug)
    }

    /// Lists a user's slugs in insertion order.
    ///
    /// # Errors
    ///
    /// - [`AppError::UserNotFound`] if the user does not exist
    /// - [`AppError::Store`] / [`AppError::IdentityProvider`] on backend failures
    pub async fn list_slugs(&self, user_id: &str) -> Result<Vec<Slug>, AppError> {
        self.identity.require_user(user_id).await?;

        let records = self.gateway.find_slug_records_by_user(user_id).await?;
        Ok(records.into_iter().map(Slug::from).collect())
    }

    /// Updates token and target of the slug matching both `id` and owner.
    ///
    /// Completes successfully even when nothing matched.
    ///
    /// # Errors
    ///
    /// - [`AppError::UserNotFound`] if the owner does not exist
    /// - [`AppError::Store`] / [`AppError::IdentityProvider`] on backend failures
    pub async fn update_slug(&self, slug: Slug) -> Result<(), AppError> {
        self.identity.require_user(&slug.user_id).await?;

        let matched = self
            .gateway
            .update_slug_record(slug.id, &slug.user_id, slug.slug, slug.domain)
            .await?;

        if matched == 0 {
            tracing::warn!(id = %slug.id, user_id = %slug.user_id, "Update matched no slug");
        }

        Ok(())
    }

    /// Deletes the slug matching both `id` and owner.
    ///
    /// Idempotent: deleting a missing slug succeeds.
    ///
    /// # Errors
    ///
    /// - [`AppError::UserNotFound`] if the owner does not exist
    /// - [`AppError::Store`] / [`AppError::IdentityProvider`] on backend failures
    pub async fn delete_slug(&self, id: SlugId, user_id: &str) -> Result<(), AppError> {
        self.identity.require_user(user_id).await?;

        let removed = self.gateway.delete_slug_record(id, user_id).await?;

        if removed == 0 {
            tracing::warn!(%id, user_id, "Delete matched no slug");
        }

        Ok(())
    }
}
