//! Store implementations.
//!
//! # Repositories
//!
//! - [`PgSlugRepository`] - Slug records in PostgreSQL, queried through [`crate::domain::filter::SlugFilter`]
//! - [`PgHitRepository`] - Append-only hit log in PostgreSQL
//! - [`MemoryStore`] - In-process store implementing both traits

pub mod memory_store;
pub mod pg_hit_repository;
pub mod pg_slug_repository;

pub use memory_store::MemoryStore;
pub use pg_hit_repository::PgHitRepository;
pub use pg_slug_repository::PgSlugRepository;
