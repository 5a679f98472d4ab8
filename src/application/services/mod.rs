//! Business logic services for the application layer.

pub mod identity_gate;
pub mod slug_service;

pub use identity_gate::IdentityGate;
pub use slug_service::{CreationLimit, MAX_WINDOW_DAYS, SlugService};
