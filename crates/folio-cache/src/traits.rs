//! Cache trait: the abstract interface for namespaced TTL storage.
//!
//! This trait allows the engine to be cache-agnostic. Implementations
//! include SQLite (persistent) and in-memory (for tests and single-process
//! deployments).

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// The Cache trait: async interface for namespaced get/set-with-TTL.
///
/// # Design Notes
///
/// - **Write-once entries**: callers never mutate an existing entry; the
///   only destruction path is TTL expiry, which is the backend's job.
/// - **Atomicity**: each `get` and `set` is atomic at the backend; there is
///   no read-modify-write in the contract, so no backend needs transactions
///   across calls.
/// - **Fail-closed**: a backend failure surfaces as an error for that one
///   operation; callers must not treat it as a miss.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Look up an entry. Returns `None` if the key was never set or its
    /// TTL has elapsed.
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>>;

    /// Store an entry that expires after `ttl`.
    async fn set(&self, namespace: &str, key: &str, value: &str, ttl: Duration) -> Result<()>;
}
