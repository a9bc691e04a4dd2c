//! Criteria: a permission decision expressed as a storage filter.
//!
//! `criteria` must stay behaviorally consistent with `can`: a document
//! matches the filter exactly when `can` would permit the action on it.
//! The [`Criteria::matches`] method carries that law; [`Criteria::to_query`]
//! renders the same decision as a MongoDB-style predicate for the storage
//! layer.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use folio_core::{Document, Visibility};

/// Sentinel `_id` used to render a filter that can never match. An omitted
/// filter would be misread as "no restriction", so the deny case must be an
/// explicit unmatchable predicate.
pub const NEVER_MATCH_ID: &str = "thisIdWillNeverMatch";

/// A storage-query filter equivalent to a permission decision applied
/// across all subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criteria {
    /// No restriction; matches every document.
    All,

    /// Matches no document, ever.
    Nothing,

    /// Matches documents with the given visibility whose type is not in
    /// the excluded set.
    Filter {
        visibility: Visibility,
        type_nin: Vec<String>,
    },
}

impl Criteria {
    /// Whether `doc` satisfies this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Criteria::All => true,
            Criteria::Nothing => false,
            Criteria::Filter {
                visibility,
                type_nin,
            } => doc.visibility == *visibility && !type_nin.iter().any(|t| *t == doc.type_key),
        }
    }

    /// Render as a MongoDB-style query predicate.
    pub fn to_query(&self) -> Value {
        match self {
            Criteria::All => json!({}),
            Criteria::Nothing => json!({ "_id": NEVER_MATCH_ID }),
            Criteria::Filter {
                visibility,
                type_nin,
            } => json!({
                "visibility": visibility.as_str(),
                "type": { "$nin": type_nin }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Mode;

    fn doc(type_key: &str, visibility: Visibility) -> Document {
        Document::new("d1:en:published", type_key, visibility, "en", Mode::Published)
    }

    #[test]
    fn test_all_matches_everything() {
        assert!(Criteria::All.matches(&doc("user", Visibility::LoginRequired)));
        assert_eq!(Criteria::All.to_query(), json!({}));
    }

    #[test]
    fn test_nothing_matches_nothing() {
        assert!(!Criteria::Nothing.matches(&doc("article", Visibility::Public)));
        assert_eq!(
            Criteria::Nothing.to_query(),
            json!({ "_id": NEVER_MATCH_ID })
        );
    }

    #[test]
    fn test_filter_gates_visibility_and_type() {
        let criteria = Criteria::Filter {
            visibility: Visibility::Public,
            type_nin: vec!["user".to_string()],
        };

        assert!(criteria.matches(&doc("article", Visibility::Public)));
        assert!(!criteria.matches(&doc("article", Visibility::LoginRequired)));
        assert!(!criteria.matches(&doc("user", Visibility::Public)));
    }

    #[test]
    fn test_filter_query_shape() {
        let criteria = Criteria::Filter {
            visibility: Visibility::Public,
            type_nin: vec!["user".to_string()],
        };
        assert_eq!(
            criteria.to_query(),
            json!({ "visibility": "public", "type": { "$nin": ["user"] } })
        );
    }
}
