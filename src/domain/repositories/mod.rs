//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the document store. Concrete implementations live in
//! `crate::infrastructure::persistence`; mocks are generated with `mockall`
//! for unit tests.
//!
//! - [`SlugRepository`] - Filtered find/count/update/delete over slug records
//! - [`HitRepository`] - Append-only hit log

pub mod hit_repository;
pub mod slug_repository;

pub use hit_repository::HitRepository;
pub use slug_repository::SlugRepository;

#[cfg(test)]
pub use hit_repository::MockHitRepository;
#[cfg(test)]
pub use slug_repository::MockSlugRepository;
