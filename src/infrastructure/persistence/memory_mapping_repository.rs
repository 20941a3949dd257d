//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_path: HashMap<String, UrlMapping>,
    path_by_url: HashMap<String, String>,
}

/// Process-local mapping store.
///
/// Enforces the same uniqueness invariants and conflict reporting as the
/// PostgreSQL store, which makes it a drop-in stand-in for handler and
/// service tests that need real store semantics without a database.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    inner: Mutex<Inner>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::store("store lock poisoned"))?;

        if inner.path_by_url.contains_key(&new_mapping.original_url) {
            return Err(AppError::DuplicateUrl);
        }
        if inner.by_path.contains_key(&new_mapping.short_path) {
            return Err(AppError::DuplicatePath);
        }

        inner.next_id += 1;
        let mapping = UrlMapping {
            id: inner.next_id,
            original_url: new_mapping.original_url,
            short_path: new_mapping.short_path,
            shortened_url: new_mapping.shortened_url,
            created_at: Utc::now(),
        };

        inner
            .path_by_url
            .insert(mapping.original_url.clone(), mapping.short_path.clone());
        inner
            .by_path
            .insert(mapping.short_path.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| AppError::store("store lock poisoned"))?;

        Ok(inner
            .path_by_url
            .get(original_url)
            .and_then(|path| inner.by_path.get(path))
            .cloned())
    }

    async fn find_by_path(&self, short_path: &str) -> Result<Option<UrlMapping>, AppError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| AppError::store("store lock poisoned"))?;

        Ok(inner.by_path.get(short_path).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
