//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`filter`] - Store filter selecting slug records
//! - [`repositories`] - Data access trait definitions
//! - [`identity`] - Identity provider port and tri-state lookup result
//! - [`gateway`] - Named, timeout-bounded store operations
//!
//! The domain layer has no dependency on HTTP or on a concrete store. Business
//! rules live in [`crate::application::services`].

pub mod entities;
pub mod filter;
pub mod gateway;
pub mod identity;
pub mod repositories;
