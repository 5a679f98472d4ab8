//! Port to the external identity provider.

use crate::error::IdentityError;
use async_trait::async_trait;

/// Outcome of a user lookup that reached the provider.
///
/// "Not found" is a normal answer, not an error; provider failures travel in
/// the `Err` channel as [`IdentityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup {
    Found,
    NotFound,
}

/// External identity provider answering whether a user exists.
///
/// Implementations must not cache or retry; each call is a fresh round trip.
///
/// # Implementations
///
/// - [`crate::infrastructure::identity::HttpIdentityProvider`] - REST lookup
/// - [`crate::infrastructure::identity::StaticIdentityProvider`] - fixed allow-list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Looks up `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] for any failure other than "user not found".
    async fn lookup_user(&self, user_id: &str) -> Result<UserLookup, IdentityError>;
}
