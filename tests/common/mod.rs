#![allow(dead_code)]

use std::sync::Arc;
use urlsnap::application::services::ShortenerService;
use urlsnap::domain::entities::NewMapping;
use urlsnap::domain::generator::AlphabetSliceGenerator;
use urlsnap::domain::repositories::MappingRepository;
use urlsnap::infrastructure::persistence::InMemoryMappingRepository;
use urlsnap::state::AppState;

/// Builds handler state over a fresh in-memory store with a fixed base URL.
///
/// Returns the store handle alongside the state so tests can seed and
/// inspect mappings directly.
pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    create_test_state_with_base(Some("http://localhost:3000/"))
}

/// Like [`create_test_state`], with control over the configured base URL.
/// `None` makes handlers derive the base from request headers.
pub fn create_test_state_with_base(
    base_url: Option<&str>,
) -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let generator = Arc::new(AlphabetSliceGenerator::new());

    let state = AppState {
        shortener_service: Arc::new(ShortenerService::new(repository.clone(), generator)),
        mapping_repository: repository.clone(),
        base_url: base_url.map(str::to_string),
    };

    (state, repository)
}

/// Inserts a mapping directly into the store, bypassing the service.
pub async fn seed_mapping(
    repository: &InMemoryMappingRepository,
    short_path: &str,
    original_url: &str,
    shortened_url: &str,
) {
    repository
        .insert(NewMapping {
            original_url: original_url.to_string(),
            short_path: short_path.to_string(),
            shortened_url: shortened_url.to_string(),
        })
        .await
        .unwrap();
}
