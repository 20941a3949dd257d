//! Mapping entity representing a shortened URL.

use chrono::{DateTime, Utc};

/// A persisted association between a short path and an original URL.
///
/// Mappings are created once and never updated or deleted. `shortened_url`
/// keeps the base URL observed by the request that first minted the link;
/// it is not recomputed on later lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_path: String,
    pub shortened_url: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new mapping.
///
/// `id` and `created_at` are assigned by the store on insert.
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub original_url: String,
    pub short_path: String,
    pub shortened_url: String,
}
