//! SQLite implementation of the Cache trait.
//!
//! The persistent backend: cache entries survive a process restart, which
//! matters for shared-draft links whose lifetime is measured in days. Uses
//! rusqlite with bundled SQLite behind a mutex.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{CacheError, Result};
use crate::memory::now_millis;
use crate::migration;
use crate::traits::Cache;

/// SQLite-based cache implementation.
///
/// Thread-safe via internal Mutex. Expired rows are filtered on read and
/// opportunistically deleted; nothing sweeps the table in the background.
pub struct SqliteCache {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCache {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a blocking operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CacheError::Unavailable(format!("mutex poisoned: {}", e)))?;
        f(&conn)
    }
}

#[async_trait]
impl Cache for SqliteCache {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let now = now_millis();
            let value: Option<String> = conn
                .query_row(
                    "SELECT value FROM cache_entries
                     WHERE namespace = ?1 AND key = ?2 AND expires_at > ?3",
                    params![namespace, key, now],
                    |row| row.get(0),
                )
                .optional()?;

            if value.is_none() {
                // Drop any stale row for this key while we hold the lock.
                let stale = conn.execute(
                    "DELETE FROM cache_entries
                     WHERE namespace = ?1 AND key = ?2 AND expires_at <= ?3",
                    params![namespace, key, now],
                )?;
                if stale > 0 {
                    tracing::debug!(namespace, key, "dropped expired cache entry");
                }
            }

            Ok(value)
        })
    }

    async fn set(&self, namespace: &str, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.with_conn(|conn| {
            let expires_at = now_millis() + ttl.as_millis() as i64;
            conn.execute(
                "INSERT OR REPLACE INTO cache_entries (namespace, key, value, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![namespace, key, value, expires_at],
            )?;
            Ok(())
        })
    }
}
