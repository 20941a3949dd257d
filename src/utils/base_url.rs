//! Per-request base URL capture.

use crate::error::AppError;
use axum::http::{HeaderMap, header};

/// Resolves the base URL used to build `shortened_url` for this request.
///
/// A configured base URL wins. Otherwise the base is derived from the
/// `Host` header (port included) and `X-Forwarded-Proto`, defaulting to
/// `http`, in the form `scheme://host/`.
///
/// # Errors
///
/// Returns [`AppError::MissingHost`] when no base URL is configured and the
/// `Host` header is absent or not valid UTF-8.
pub fn resolve_base_url(headers: &HeaderMap, configured: Option<&str>) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.to_string());
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::MissingHost)?;

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");

    Ok(format!("{scheme}://{host}/"))
}
