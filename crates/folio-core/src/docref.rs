//! Document references.
//!
//! A document identity arrives in one of three forms and is parsed exactly
//! once at the boundary into this sum type; precedence rules elsewhere are
//! pattern matches on the tag, never re-inspection of the raw string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::locale::{LocaleConfig, Mode};

/// Leading character marking a shortcut reference such as `_home`.
pub const SHORTCUT_SENTINEL: char = '_';

/// A parsed document reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocRef {
    /// `base:locale:mode` — carries its own locale and mode.
    Composite {
        base: String,
        locale: String,
        mode: Mode,
    },

    /// A bare id; locale and mode come from the request context.
    Bare { base: String },

    /// A shortcut like `_home` or `_trash`, resolved elsewhere and passed
    /// through unchanged.
    Shortcut { raw: String },
}

impl DocRef {
    /// Parse a reference string.
    ///
    /// A composite reference must be exactly `base:locale:mode` with a
    /// locale from the supported set and a valid mode; anything else with a
    /// `:` in it is rejected rather than reinterpreted, so a composite id
    /// can never smuggle an unsupported locale into a request.
    pub fn parse(raw: &str, config: &LocaleConfig) -> Result<DocRef> {
        if raw.is_empty() {
            return Err(CoreError::InvalidRef("empty reference".to_string()));
        }
        if raw.starts_with(SHORTCUT_SENTINEL) {
            return Ok(DocRef::Shortcut {
                raw: raw.to_string(),
            });
        }
        if !raw.contains(':') {
            return Ok(DocRef::Bare {
                base: raw.to_string(),
            });
        }
        let parts: Vec<&str> = raw.split(':').collect();
        let [base, locale, mode] = parts.as_slice() else {
            return Err(CoreError::InvalidRef(format!(
                "expected base:locale:mode, got {}",
                raw
            )));
        };
        if base.is_empty() {
            return Err(CoreError::InvalidRef(format!("empty base in {}", raw)));
        }
        if !config.is_supported(locale) {
            return Err(CoreError::UnsupportedLocale((*locale).to_string()));
        }
        let mode = mode.parse::<Mode>()?;
        Ok(DocRef::Composite {
            base: base.to_string(),
            locale: (*locale).to_string(),
            mode,
        })
    }

    /// The base id, where one exists (shortcuts are opaque).
    pub fn base(&self) -> Option<&str> {
        match self {
            DocRef::Composite { base, .. } | DocRef::Bare { base } => Some(base),
            DocRef::Shortcut { .. } => None,
        }
    }

    /// Render back to the string form: `base:locale:mode` for composite
    /// references, the raw text otherwise.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocRef::Composite { base, locale, mode } => {
                write!(f, "{}:{}:{}", base, locale, mode)
            }
            DocRef::Bare { base } => f.write_str(base),
            DocRef::Shortcut { raw } => f.write_str(raw),
        }
    }
}
