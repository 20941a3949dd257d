//! Handler for short path redirect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::state::AppState;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Url Not Found</title>
</head>
<body>
  <h1>Url Not Found</h1>
  <p>The short link you followed does not exist.</p>
</body>
</html>
"#;

/// Redirects a short path to its original URL.
///
/// # Endpoint
///
/// `GET /{short_path}`
///
/// Responds with `307 Temporary Redirect` to the original destination. An
/// unknown path gets the not-found page with status 404; translating the
/// typed failure into transport semantics happens here, not in the core.
pub async fn redirect_handler(
    Path(short_path): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.shortener_service.resolve(&short_path).await {
        Ok(original_url) => Redirect::temporary(&original_url).into_response(),
        Err(AppError::NotFound) => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, %short_path, "redirect lookup failed");
            e.into_response()
        }
    }
}
