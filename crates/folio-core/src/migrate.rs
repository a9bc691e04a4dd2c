//! One-time data migrations.
//!
//! These transforms run once over stored documents when an installation is
//! upgraded. They are idempotent so a partially-applied run can simply be
//! repeated; none of them are consulted at request time.

use serde_json::Value;

/// Retire the legacy boolean `published` field in favor of `visibility`.
///
/// `published: true` becomes `visibility: "public"`, `published: false`
/// becomes `visibility: "loginRequired"`, and `published` is removed. A
/// document that already has a `visibility` value keeps it. Returns whether
/// the document changed.
pub fn retire_published_field(doc: &mut Value) -> bool {
    let Some(obj) = doc.as_object_mut() else {
        return false;
    };
    let published = obj.remove("published");
    let Some(published) = published else {
        return false;
    };
    if !obj.contains_key("visibility") {
        let visibility = match published.as_bool() {
            Some(true) => "public",
            _ => "loginRequired",
        };
        obj.insert("visibility".to_string(), Value::String(visibility.into()));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_published_true_becomes_public() {
        let mut doc = json!({ "_id": "a1", "published": true });
        assert!(retire_published_field(&mut doc));
        assert_eq!(doc, json!({ "_id": "a1", "visibility": "public" }));
    }

    #[test]
    fn test_published_false_becomes_login_required() {
        let mut doc = json!({ "_id": "a1", "published": false });
        assert!(retire_published_field(&mut doc));
        assert_eq!(doc, json!({ "_id": "a1", "visibility": "loginRequired" }));
    }

    #[test]
    fn test_idempotent() {
        let mut doc = json!({ "_id": "a1", "published": true });
        retire_published_field(&mut doc);
        let after_first = doc.clone();
        assert!(!retire_published_field(&mut doc));
        assert_eq!(doc, after_first);
    }

    #[test]
    fn test_existing_visibility_wins() {
        let mut doc = json!({ "_id": "a1", "published": true, "visibility": "loginRequired" });
        assert!(retire_published_field(&mut doc));
        assert_eq!(doc["visibility"], "loginRequired");
        assert!(doc.get("published").is_none());
    }

    #[test]
    fn test_untouched_without_legacy_field() {
        let mut doc = json!({ "_id": "a1", "visibility": "public" });
        assert!(!retire_published_field(&mut doc));
    }
}
