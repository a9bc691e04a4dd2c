//! Locales and publication modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Draft vs. published variant of a document.
///
/// Exactly these two values exist; nothing else is ever resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Draft,
    #[default]
    Published,
}

impl Mode {
    /// The wire string for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Draft => "draft",
            Mode::Published => "published",
        }
    }

    /// Parse a mode, returning `None` for anything but the two valid values.
    ///
    /// Unlike [`FromStr`], this is for the silent-fallback paths where an
    /// invalid mode is ignored rather than reported.
    pub fn parse_opt(s: &str) -> Option<Mode> {
        match s {
            "draft" => Some(Mode::Draft),
            "published" => Some(Mode::Published),
            _ => None,
        }
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::parse_opt(s).ok_or_else(|| CoreError::InvalidMode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The configured, ordered set of supported locales.
///
/// Every locale this core resolves is a member of this set; the first entry
/// is the default unless one is named explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    locales: Vec<String>,
    default_locale: String,
}

impl LocaleConfig {
    /// Build a config whose default is the first supported locale.
    pub fn new(locales: Vec<String>) -> Result<Self> {
        let default_locale = locales
            .first()
            .cloned()
            .ok_or_else(|| CoreError::InvalidConfig("locale list is empty".to_string()))?;
        Ok(Self {
            locales,
            default_locale,
        })
    }

    /// Build a config with an explicit default locale.
    pub fn with_default(locales: Vec<String>, default_locale: impl Into<String>) -> Result<Self> {
        let default_locale = default_locale.into();
        if locales.is_empty() {
            return Err(CoreError::InvalidConfig("locale list is empty".to_string()));
        }
        if !locales.iter().any(|l| l == &default_locale) {
            return Err(CoreError::InvalidConfig(format!(
                "default locale {} is not in the supported set",
                default_locale
            )));
        }
        Ok(Self {
            locales,
            default_locale,
        })
    }

    /// Whether `locale` is a member of the supported set.
    pub fn is_supported(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// The default locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The supported locales, in configured order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }
}

impl Default for LocaleConfig {
    /// A single-locale `en` config, matching the out-of-the-box setup.
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string()],
            default_locale: "en".to_string(),
        }
    }
}
