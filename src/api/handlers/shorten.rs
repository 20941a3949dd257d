//! Handler for the shorten endpoint.

use axum::{Json, extract::State, http::HeaderMap};

use crate::api::dto::shorten::ShortenResponse;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;

/// Shortens a single URL.
///
/// # Endpoint
///
/// `POST /` with a JSON string body, e.g. `"https://example.com/some/page"`.
///
/// # Response
///
/// Always `200 OK`:
///
/// ```json
/// {"result": true, "url": "http://localhost:3000/AbCd", "error": null}
/// {"result": false, "url": null, "error": "This is not a valid Url"}
/// ```
///
/// The base URL baked into the returned link is the one observed on this
/// request (or the configured override), so the link points back at
/// whichever host served the shortening.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(url): Json<String>,
) -> Json<ShortenResponse> {
    let base_url = match resolve_base_url(&headers, state.base_url.as_deref()) {
        Ok(base) => base,
        Err(e) => return Json(ShortenResponse::failure(e.to_string())),
    };

    match state.shortener_service.shorten_url(&url, &base_url).await {
        Ok(mapping) => Json(ShortenResponse::success(mapping.shortened_url)),
        Err(e) => {
            tracing::debug!(error = %e, "shorten request rejected");
            Json(ShortenResponse::failure(e.to_string()))
        }
    }
}
