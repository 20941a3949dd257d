//! URL normalization and validation policy.
//!
//! This is a heuristic filter, not an RFC 3986 parser: the pattern is
//! matched case-insensitively starting anywhere in the string, so anything
//! trailing a valid prefix is tolerated.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled pattern for accepted URLs: an http(s) scheme, an optional
/// `www.`, a host run, a dot, a short TLD-like token, and an optional tail.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()!@:%_+.~#?&/=]*",
    )
    .unwrap()
});

/// Errors produced by [`normalize_url`] and [`normalize_and_validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("url is empty or blank")]
    Empty,

    #[error("url does not match the accepted pattern")]
    Invalid,
}

/// Normalizes a raw URL string.
///
/// Empty or whitespace-only input is rejected as its own failure kind.
/// Input that does not begin with the literal prefix `http` gets `http://`
/// prepended; everything else passes through untouched.
pub fn normalize_url(raw: &str) -> Result<String, UrlValidationError> {
    if raw.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if raw.starts_with("http") {
        Ok(raw.to_string())
    } else {
        Ok(format!("http://{raw}"))
    }
}

/// Returns true when the URL matches the accepted pattern.
pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

/// Normalizes and validates in one step.
pub fn normalize_and_validate(raw: &str) -> Result<String, UrlValidationError> {
    let url = normalize_url(raw)?;

    if !is_valid_url(&url) {
        return Err(UrlValidationError::Invalid);
    }

    Ok(url)
}
