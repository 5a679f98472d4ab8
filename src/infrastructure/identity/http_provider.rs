//! REST client for the external identity provider.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

use crate::domain::identity::{IdentityProvider, UserLookup};
use crate::error::IdentityError;

/// Connection settings for [`HttpIdentityProvider`].
#[derive(Debug, Clone)]
pub struct HttpIdentityConfig {
    /// Provider base URL, e.g. `"https://identity.example.com/v1"`.
    pub base_url: String,

    /// Credential sent as a Bearer token.
    pub api_key: String,

    /// Upper bound for a single lookup.
    pub timeout: Duration,
}

/// Identity provider answering `GET {base_url}/users/{uid}`.
///
/// - `200` means the user exists
/// - `404` means the user does not exist
/// - any other status or transport failure is an [`IdentityError`]
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl HttpIdentityProvider {
    /// Builds the client once; it is shared by all requests.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Config`] for an unusable base URL and
    /// [`IdentityError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: HttpIdentityConfig) -> Result<Self, IdentityError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| IdentityError::Config(format!("invalid IDENTITY_URL: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(IdentityError::Config(format!(
                "IDENTITY_URL cannot be used as a base: {}",
                config.base_url
            )));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url,
            api_key: config.api_key,
            http,
        })
    }

    /// Builds the lookup URL with `user_id` as a single percent-encoded segment.
    fn user_url(&self, user_id: &str) -> Result<Url, IdentityError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| IdentityError::Config("IDENTITY_URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["users", user_id]);
        Ok(url)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn lookup_user(&self, user_id: &str) -> Result<UserLookup, IdentityError> {
        let url = self.user_url(user_id)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(UserLookup::Found),
            StatusCode::NOT_FOUND => {
                debug!(user_id, "Identity provider reports unknown user");
                Ok(UserLookup::NotFound)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(IdentityError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
