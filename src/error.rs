//! Error types for plume modules using thiserror.

use std::fmt;

use thiserror::Error;

use crate::request::ContentType;

/// Classified provider failure kinds.
///
/// This is a taxonomy, not a set of exception types: the provider adapter
/// translates provider-specific error shapes into these kinds at its edge,
/// and nothing above that boundary inspects raw status codes or messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Provider reported capacity-based unavailability (503 / "UNAVAILABLE").
    Overloaded,
    /// Other server-side failure (5xx).
    Unavailable,
    /// Quota exhaustion (429 / "RESOURCE_EXHAUSTED").
    RateLimited,
    /// Response body unreadable or already consumed.
    StreamCorrupted,
    /// DNS, connect, or timeout failure before a response arrived.
    NetworkUnreachable,
    /// Missing or placeholder API key.
    InvalidCredentials,
    /// Provider answered successfully but with no usable text.
    EmptyResponse,
    /// Anything the adapter could not classify.
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Overloaded => "overloaded",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::StreamCorrupted => "stream_corrupted",
            ErrorKind::NetworkUnreachable => "network_unreachable",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-input errors detected before any network attempt.
///
/// These are the only errors the pipeline ever surfaces to its caller;
/// provider failures are absorbed by the retry loop or degrade to
/// synthesized fallback content.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("{content_type} request is missing required field '{field}'")]
    MissingField {
        content_type: ContentType,
        field: &'static str,
    },
}

/// Errors from a single provider attempt, split by retry eligibility.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("transient provider failure ({kind}): {message}")]
    Retryable { kind: ErrorKind, message: String },

    #[error("fatal provider failure ({kind}): {message}")]
    Fatal { kind: ErrorKind, message: String },
}

impl ProviderError {
    pub fn retryable(kind: ErrorKind, message: impl Into<String>) -> Self {
        ProviderError::Retryable {
            kind,
            message: message.into(),
        }
    }

    pub fn fatal(kind: ErrorKind, message: impl Into<String>) -> Self {
        ProviderError::Fatal {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Retryable { kind, .. } | ProviderError::Fatal { kind, .. } => *kind,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Retryable { .. })
    }
}
