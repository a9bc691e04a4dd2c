//! Error types for the Folio core.

use thiserror::Error;

/// Core errors that can occur while parsing or validating domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid mode: {0}")]
    InvalidMode(String),

    #[error("invalid document reference: {0}")]
    InvalidRef(String),

    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
