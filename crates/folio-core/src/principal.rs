//! Principals and actions.
//!
//! The current permission model is deliberately coarse: a principal is
//! either anonymous or authenticated, and authenticated principals can do
//! anything. Finer-grained roles (guest, contributor, editor, admin) will
//! refine the `Authenticated` side later; every decision path already goes
//! through `&Principal` plus an opaque [`Action`], so new variants slot in
//! without changing call signatures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The acting identity for a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principal {
    /// No logged-in user.
    Anonymous,

    /// A logged-in user.
    Authenticated {
        /// Stable user id.
        id: String,
    },
}

impl Principal {
    /// Construct an authenticated principal.
    pub fn user(id: impl Into<String>) -> Self {
        Principal::Authenticated { id: id.into() }
    }

    /// Whether this principal is a logged-in user.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Authenticated { .. })
    }
}

/// An opaque capability key being checked, e.g. `view`, `edit`, `view-draft`.
///
/// Actions follow a `verb-noun` shape but are treated as opaque strings by
/// the evaluator except for the literal `view` fast path. This lets policy
/// introduce special actions (like `view-draft`) without new code, as long
/// as the default answer for anonymous principals stays "deny".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    /// The plain view action.
    pub const VIEW: &'static str = "view";
    /// Draft visibility, not tied to a particular document.
    pub const VIEW_DRAFT: &'static str = "view-draft";
    /// Editing a document.
    pub const EDIT: &'static str = "edit";

    /// Construct an action from its string key.
    pub fn new(key: impl Into<String>) -> Self {
        Action(key.into())
    }

    /// The full action key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The verb part of a `verb-noun` action (the text before the first `-`).
    pub fn verb(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl From<&str> for Action {
    fn from(key: &str) -> Self {
        Action(key.to_string())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
