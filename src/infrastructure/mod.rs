//! Infrastructure layer for external integrations.
//!
//! Implements the ports defined by the domain layer.
//!
//! # Modules
//!
//! - [`identity`] - Identity provider clients
//! - [`persistence`] - PostgreSQL and in-memory store implementations

pub mod identity;
pub mod persistence;
