//! DTOs for the shorten endpoint.

use serde::Serialize;

/// Response envelope for `POST /`.
///
/// Failures travel in the body, not the status code: the endpoint answers
/// `200 OK` either way, with `result` flagging the outcome and `error`
/// carrying the failure message.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub result: bool,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl ShortenResponse {
    pub fn success(url: String) -> Self {
        Self {
            result: true,
            url: Some(url),
            error: None,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            result: false,
            url: None,
            error: Some(message),
        }
    }
}
