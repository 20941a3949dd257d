//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Unique index backing the one-mapping-per-path invariant.
const SHORT_PATH_CONSTRAINT: &str = "mappings_short_path_key";

/// Unique index backing the one-mapping-per-url invariant.
const ORIGINAL_URL_CONSTRAINT: &str = "mappings_original_url_key";

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    short_path: String,
    shortened_url: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping {
            id: row.id,
            original_url: row.original_url,
            short_path: row.short_path,
            shortened_url: row.shortened_url,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for mapping storage and retrieval.
///
/// Uniqueness of `short_path` and `original_url` is enforced by the unique
/// indexes created in the migrations; a rejected insert is reported as the
/// matching typed conflict so the service can react.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO mappings (original_url, short_path, shortened_url)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_path, shortened_url, created_at
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_path)
        .bind(&new_mapping.shortened_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        Ok(row.into())
    }

    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, short_path, shortened_url, created_at
            FROM mappings
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_path(&self, short_path: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, short_path, shortened_url, created_at
            FROM mappings
            WHERE short_path = $1
            "#,
        )
        .bind(short_path)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

/// Maps unique-index violations on insert to their typed conflicts.
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return match db.constraint() {
            Some(SHORT_PATH_CONSTRAINT) => AppError::DuplicatePath,
            Some(ORIGINAL_URL_CONSTRAINT) => AppError::DuplicateUrl,
            _ => AppError::Store(e.to_string()),
        };
    }

    AppError::Store(e.to_string())
}
