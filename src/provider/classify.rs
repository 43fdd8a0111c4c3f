//! Typed error classification at the provider edge.
//!
//! Provider failures arrive as transport errors, HTTP statuses, or an
//! error envelope in the body. This module is the only place those raw
//! shapes are inspected; everything leaves as a `ProviderError` with a
//! fixed `ErrorKind`. Unrecognized failures lean retryable, since
//! provider errors are usually transient; a non-429 4xx is the exception
//! and is fatal.

use serde::Deserialize;

use crate::error::{ErrorKind, ProviderError};

/// Longest slice of a raw error body carried into an error message.
const MAX_MESSAGE_LEN: usize = 300;

/// Gemini-style error envelope: `{"error": {"code": .., "message": ..,
/// "status": "UNAVAILABLE"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Classify a transport-level failure (no HTTP response arrived, or the
/// body could not be read).
pub fn transport_error(err: reqwest::Error) -> ProviderError {
    let kind = if err.is_connect() || err.is_timeout() {
        ErrorKind::NetworkUnreachable
    } else if err.is_body() || err.is_decode() {
        // Includes the stream-already-consumed case; the executor
        // recreates the handle before the next attempt.
        ErrorKind::StreamCorrupted
    } else {
        ErrorKind::Unknown
    };
    ProviderError::retryable(kind, err.to_string())
}

/// Classify a non-success HTTP status plus whatever body came with it.
pub fn status_error(status: u16, body: &str) -> ProviderError {
    let api = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error);

    let api_status = api.as_ref().map(|e| e.status.as_str()).unwrap_or("");
    let message = match api {
        Some(ref e) if !e.message.is_empty() => e.message.clone(),
        _ => format!("HTTP {status}: {}", truncate(body)),
    };

    let status_kind = match api_status {
        "UNAVAILABLE" => Some(ErrorKind::Overloaded),
        "RESOURCE_EXHAUSTED" => Some(ErrorKind::RateLimited),
        _ => None,
    };

    match status {
        503 => ProviderError::retryable(ErrorKind::Overloaded, message),
        429 => ProviderError::retryable(ErrorKind::RateLimited, message),
        500..=599 => {
            ProviderError::retryable(status_kind.unwrap_or(ErrorKind::Unavailable), message)
        }
        400..=499 => match status_kind {
            // Quota reported on a 4xx (e.g. 403 RESOURCE_EXHAUSTED) is
            // still transient; every other 4xx is fatal.
            Some(ErrorKind::RateLimited) => {
                ProviderError::retryable(ErrorKind::RateLimited, message)
            }
            _ => ProviderError::fatal(ErrorKind::Unknown, message),
        },
        _ => ProviderError::retryable(status_kind.unwrap_or(ErrorKind::Unknown), message),
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
