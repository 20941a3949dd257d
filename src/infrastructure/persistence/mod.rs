//! Mapping store implementations.
//!
//! - [`PgMappingRepository`] - PostgreSQL, the production store
//! - [`InMemoryMappingRepository`] - process-local store for tests and
//!   seeding

pub mod memory_mapping_repository;
pub mod pg_mapping_repository;

pub use memory_mapping_repository::InMemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
