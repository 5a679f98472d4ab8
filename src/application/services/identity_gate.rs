//! Identity gate: user existence checks against the identity provider.

use std::sync::Arc;

use crate::domain::identity::{IdentityProvider, UserLookup};
use crate::error::AppError;

/// Normalizes identity provider answers into a boolean existence check.
///
/// No caching and no retries: every call is a fresh provider round trip.
#[derive(Clone)]
pub struct IdentityGate {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityGate {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Returns whether `user_id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::IdentityProvider`] for provider failures other than
    /// "user not found".
    pub async fn user_exists(&self, user_id: &str) -> Result<bool, AppError> {
        let lookup = self.provider.lookup_user(user_id).await?;
        Ok(lookup == UserLookup::Found)
    }

    /// Fails with [`AppError::UserNotFound`] unless `user_id` exists.
    ///
    /// # Errors
    ///
    /// See [`Self::user_exists`].
    pub async fn require_user(&self, user_id: &str) -> Result<(), AppError> {
        if self.user_exists(user_id).await? {
            Ok(())
        } else {
            tracing::debug!(user_id, "Unknown user");
            Err(AppError::UserNotFound {
                user_id: user_id.to_string(),
            })
        }
    }
}
