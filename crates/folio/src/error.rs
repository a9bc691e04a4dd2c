//! Error types for the Folio engine.
//!
//! Two of these are wire-visible kinds in the request-boundary contract:
//! `forbidden` (the principal lacks a required action) and `invalid`
//! (malformed input such as a bad share URL). Recoverable input problems —
//! an unsupported locale, an unknown mode, an absent or mismatched share
//! token — are not errors at all; they fall back to policy defaults inside
//! the negotiator and never surface here.

use serde::Serialize;
use thiserror::Error;

use folio_cache::CacheError;
use folio_core::CoreError;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The principal lacks the action required for this operation.
    #[error("forbidden")]
    Forbidden,

    /// Malformed input, e.g. a share URL without a leading `/`.
    #[error("invalid: {0}")]
    Invalid(String),

    /// Invalid domain value (bad document reference, bad config).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The backing cache failed. Draft-share access fails closed: this is
    /// an error for the operation, never treated as a miss.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Wire-level classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Forbidden,
    Invalid,
    Cache,
}

impl ErrorKind {
    /// The error-kind identifier carried on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Invalid => "invalid",
            ErrorKind::Cache => "cache",
        }
    }
}

/// The structured error body a networked deployment serializes: an
/// error-kind identifier and nothing else.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
}

impl EngineError {
    /// Classify this error for the request boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Forbidden => ErrorKind::Forbidden,
            EngineError::Invalid(_) | EngineError::Core(_) => ErrorKind::Invalid,
            EngineError::Cache(_) => ErrorKind::Cache,
        }
    }

    /// HTTP-style status for a networked deployment.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Forbidden => 403,
            ErrorKind::Invalid => 400,
            ErrorKind::Cache => 500,
        }
    }

    /// The structured wire body for this error.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            name: self.kind().as_str(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_maps_to_403() {
        let err = EngineError::Forbidden;
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.http_status(), 403);
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            serde_json::json!({ "name": "forbidden" })
        );
    }

    #[test]
    fn test_invalid_maps_to_400() {
        let err = EngineError::Invalid("bad url".to_string());
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.body().name, "invalid");
    }
}
