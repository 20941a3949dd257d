//! Shared application state.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::domain::repositories::MappingRepository;

/// State injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<ShortenerService>,
    /// Direct store handle for the health probe.
    pub mapping_repository: Arc<dyn MappingRepository>,
    /// Configured base URL override; when `None` the base is derived from
    /// request headers.
    pub base_url: Option<String>,
}
