//! Type-manager registry collaborator.
//!
//! The surrounding system keeps one manager per document type; the only
//! facts this core needs from it are which types exist and which of them
//! are admin-only (never visible to anonymous principals, regardless of
//! per-instance visibility). The registry is read-only from here.

use std::collections::BTreeMap;

/// Read-only view of the per-type manager registry.
pub trait TypeRegistry: Send + Sync {
    /// Whether documents of this type are restricted to admins.
    ///
    /// Unknown types have no manager claiming admin-only status and
    /// answer `false`; the registry is the authoritative list of types in
    /// the surrounding system, so an unknown type here is a wiring bug
    /// upstream, not a decision this core can make.
    fn is_admin_only(&self, type_key: &str) -> bool;

    /// All registered type keys.
    fn type_keys(&self) -> Vec<String>;

    /// The registered types that are admin-only.
    fn admin_only_types(&self) -> Vec<String> {
        self.type_keys()
            .into_iter()
            .filter(|key| self.is_admin_only(key))
            .collect()
    }
}

/// A fixed registry built up front, for embedders and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    types: BTreeMap<String, bool>,
}

impl StaticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type.
    pub fn with_type(mut self, type_key: impl Into<String>, admin_only: bool) -> Self {
        self.types.insert(type_key.into(), admin_only);
        self
    }
}

impl TypeRegistry for StaticRegistry {
    fn is_admin_only(&self, type_key: &str) -> bool {
        self.types.get(type_key).copied().unwrap_or(false)
    }

    fn type_keys(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_registry() {
        let registry = StaticRegistry::new()
            .with_type("article", false)
            .with_type("user", true);

        assert!(registry.is_admin_only("user"));
        assert!(!registry.is_admin_only("article"));
        assert!(!registry.is_admin_only("unknown"));
        assert_eq!(registry.admin_only_types(), vec!["user".to_string()]);
    }
}
