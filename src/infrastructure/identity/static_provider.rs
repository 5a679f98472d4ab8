//! Fixed allow-list identity provider.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::identity::{IdentityProvider, UserLookup};
use crate::error::IdentityError;

/// Identity provider backed by a fixed set of user ids.
///
/// Intended for local development and tests where no provider is reachable.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    users: HashSet<String>,
}

impl StaticIdentityProvider {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a comma-separated list, ignoring blanks.
    pub fn from_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn lookup_user(&self, user_id: &str) -> Result<UserLookup, IdentityError> {
        Ok(if self.users.contains(user_id) {
            UserLookup::Found
        } else {
            UserLookup::NotFound
        })
    }
}
