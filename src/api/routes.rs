//! API route configuration.

use crate::api::handlers::{health_handler, index_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Public routes.
///
/// # Endpoints
///
/// - `GET  /`             - landing page
/// - `POST /`             - shorten a URL (JSON string body)
/// - `GET  /health`       - health check
/// - `GET  /{short_path}` - redirect to the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler).post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{short_path}", get(redirect_handler))
}
