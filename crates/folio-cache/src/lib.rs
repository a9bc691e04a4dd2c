//! # Folio Cache
//!
//! Namespaced TTL cache abstraction for Folio.
//!
//! The engine's only external shared state lives here: short-lived entries
//! written once and destroyed solely by expiry. The [`Cache`] trait keeps
//! the engine backend-agnostic; [`SqliteCache`] is the persistent backend
//! and [`MemoryCache`] serves tests and single-process deployments.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{CacheError, Result};
pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use traits::Cache;
