//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations: they consult the identity gate,
//! apply policy, and drive the store gateway. HTTP handlers and the admin CLI
//! call into this layer only.
//!
//! # Available Services
//!
//! - [`services::identity_gate::IdentityGate`] - User existence checks
//! - [`services::slug_service::SlugService`] - Slug lifecycle and creation limit

pub mod services;
