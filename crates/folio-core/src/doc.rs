//! Documents and visibility.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::locale::Mode;

/// Per-instance visibility gate for anonymous viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Anyone may view.
    #[serde(rename = "public")]
    Public,

    /// Only logged-in users may view.
    #[serde(rename = "loginRequired")]
    LoginRequired,
}

impl Visibility {
    /// The wire string for this visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::LoginRequired => "loginRequired",
        }
    }
}

/// A document instance as this core sees it.
///
/// Each document belongs to exactly one locale/mode pair. Fields this core
/// does not interpret, including annotation markers like `_edit`, live in
/// the flattened `extra` map and round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full document id, typically in composite `base:locale:mode` form.
    #[serde(rename = "_id")]
    pub id: String,

    /// Key into the type-manager registry.
    #[serde(rename = "type")]
    pub type_key: String,

    /// Per-instance gate for anonymous viewers.
    pub visibility: Visibility,

    /// The locale this variant belongs to.
    pub locale: String,

    /// The publication mode of this variant.
    pub mode: Mode,

    /// Everything else, untouched by this core.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Build a document with no extra fields.
    pub fn new(
        id: impl Into<String>,
        type_key: impl Into<String>,
        visibility: Visibility,
        locale: impl Into<String>,
        mode: Mode,
    ) -> Self {
        Self {
            id: id.into(),
            type_key: type_key.into(),
            visibility,
            locale: locale.into(),
            mode,
            extra: Map::new(),
        }
    }
}
