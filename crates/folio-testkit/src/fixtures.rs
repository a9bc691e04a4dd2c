//! Test fixtures and helpers.
//!
//! Common setup code for integration and property tests.

use std::sync::Arc;
use std::time::Duration;

use folio::{Engine, EngineConfig, MemorySession};
use folio_cache::MemoryCache;
use folio_core::{Document, LocaleConfig, Mode, Visibility};
use folio_perms::StaticRegistry;

/// A test fixture with an engine over a memory cache and a fixed registry.
pub struct TestFixture {
    pub engine: Engine<StaticRegistry>,
    pub cache: Arc<MemoryCache>,
}

impl TestFixture {
    /// The standard fixture: `en`/`fr` locales, `article` and `page`
    /// types plus an admin-only `user` type, one-hour share lifetime.
    pub fn new() -> Self {
        Self::with_registry(
            StaticRegistry::new()
                .with_type("article", false)
                .with_type("page", false)
                .with_type("user", true),
        )
    }

    /// A fixture over a caller-supplied registry.
    pub fn with_registry(registry: StaticRegistry) -> Self {
        let cache = Arc::new(MemoryCache::new());
        let config = EngineConfig {
            locales: LocaleConfig::new(vec!["en".into(), "fr".into()])
                .expect("fixture locales are valid"),
            share_lifetime: Duration::from_secs(3600),
        };
        Self {
            engine: Engine::new(registry, cache.clone(), config),
            cache,
        }
    }

    /// A fresh empty session.
    pub fn session(&self) -> MemorySession {
        MemorySession::new()
    }

    /// A published public document of the given type.
    pub fn make_doc(&self, base: &str, type_key: &str) -> Document {
        Document::new(
            format!("{base}:en:published"),
            type_key,
            Visibility::Public,
            "en",
            Mode::Published,
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
