//! In-memory implementation of the Cache trait.
//!
//! Used in tests and in single-process deployments that do not need cache
//! entries to survive a restart. Expired entries are dropped lazily on
//! lookup; there is no background sweeper.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::error::{CacheError, Result};
use crate::traits::Cache;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: i64,
}

/// In-memory cache, thread-safe via an internal RwLock.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<(String, String), Entry>>,
    /// Test-only clock skew in milliseconds, added to the wall clock so
    /// expiry can be exercised without sleeping.
    skew_ms: AtomicI64,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance this cache's notion of "now" by `delta`.
    ///
    /// Only meaningful in tests; production code never skews the clock.
    pub fn advance(&self, delta: Duration) {
        self.skew_ms
            .fetch_add(delta.as_millis() as i64, Ordering::SeqCst);
    }

    fn now_ms(&self) -> i64 {
        now_millis() + self.skew_ms.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let full_key = (namespace.to_string(), key.to_string());
        let now = self.now_ms();

        {
            let entries = self
                .entries
                .read()
                .map_err(|e| CacheError::Unavailable(format!("lock poisoned: {}", e)))?;
            match entries.get(&full_key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Entry exists but has expired; drop it.
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::Unavailable(format!("lock poisoned: {}", e)))?;
        if let Some(entry) = entries.get(&full_key) {
            if entry.expires_at <= now {
                entries.remove(&full_key);
            }
        }
        Ok(None)
    }

    async fn set(&self, namespace: &str, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::Unavailable(format!("lock poisoned: {}", e)))?;
        entries.insert(
            (namespace.to_string(), key.to_string()),
            Entry {
                value: value.to_string(),
                expires_at: self.now_ms() + ttl.as_millis() as i64,
            },
        );
        Ok(())
    }
}

/// Current Unix time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache
            .set("shared-drafts", "tok", "/page", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            cache.get("shared-drafts", "tok").await.unwrap(),
            Some("/page".to_string())
        );
    }

    #[tokio::test]
    async fn test_miss_on_absent_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("shared-drafts", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_namespaces_are_disjoint() {
        let cache = MemoryCache::new();
        cache
            .set("a", "k", "1", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("b", "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = MemoryCache::new();
        cache
            .set("a", "k", "1", Duration::from_secs(60))
            .await
            .unwrap();
        cache.advance(Duration::from_secs(61));
        assert_eq!(cache.get("a", "k").await.unwrap(), None);
        // And stays a miss once evicted.
        assert_eq!(cache.get("a", "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_ttl() {
        let cache = MemoryCache::new();
        cache.set("a", "k", "1", Duration::from_secs(10)).await.unwrap();
        cache.advance(Duration::from_secs(8));
        cache.set("a", "k", "2", Duration::from_secs(10)).await.unwrap();
        cache.advance(Duration::from_secs(8));
        assert_eq!(cache.get("a", "k").await.unwrap(), Some("2".to_string()));
    }
}
