//! Identity provider clients.
//!
//! - [`HttpIdentityProvider`] - REST lookup against the external provider
//! - [`StaticIdentityProvider`] - Fixed allow-list for development and tests

mod http_provider;
mod static_provider;

pub use http_provider::{HttpIdentityConfig, HttpIdentityProvider};
pub use static_provider::StaticIdentityProvider;
