//! Repository trait for short URL mappings.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for `short_path -> original_url` mappings.
///
/// The store, not the caller, enforces both uniqueness invariants: one
/// mapping per `short_path` and one mapping per `original_url`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping, assigning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicatePath`] or [`AppError::DuplicateUrl`]
    /// when the corresponding unique index rejects the row, and
    /// [`AppError::Store`] on other database errors.
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by its normalized original URL (exact match).
    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its short path (exact match).
    async fn find_by_path(&self, short_path: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
