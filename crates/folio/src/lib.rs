//! # Folio
//!
//! Per-request access control and content-variant resolution for a
//! multi-tenant, multi-locale document system.
//!
//! ## Overview
//!
//! For every incoming request the engine decides:
//!
//! - **Which variant**: the locale and publication mode (draft vs.
//!   published) the request addresses, negotiated from query parameters,
//!   session state, and configured defaults
//! - **Whether allowed**: if the acting principal may perform a named
//!   action on a document or document type
//! - **What to fetch**: a storage filter returning only documents the
//!   principal is authorized to see
//!
//! It also issues short-lived **share tokens** that grant draft visibility
//! for one exact URL to an unauthenticated viewer.
//!
//! ## Key Concepts
//!
//! - **Principal**: anonymous or authenticated; authenticated principals
//!   currently can do anything, the public can only view public content.
//! - **Composite id**: `base:locale:mode` — a document id that carries its
//!   own variant coordinates.
//! - **Share token**: an unguessable bearer secret in the TTL cache;
//!   expiry is its only destruction path.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio::{Engine, EngineConfig, MemorySession, RequestParams};
//! use folio::cache::MemoryCache;
//! use folio::core::Principal;
//! use folio::perms::StaticRegistry;
//!
//! async fn example() {
//!     let registry = StaticRegistry::new()
//!         .with_type("article", false)
//!         .with_type("user", true);
//!     let engine = Engine::new(
//!         registry,
//!         Arc::new(MemoryCache::new()),
//!         EngineConfig::default(),
//!     );
//!
//!     let mut session = MemorySession::new();
//!     let ctx = engine
//!         .resolve(
//!             &Principal::Anonymous,
//!             RequestParams::new("/article/hello"),
//!             &mut session,
//!         )
//!         .await
//!         .unwrap();
//!
//!     let (id, _ctx) = engine.rewrite_id(&ctx, "abc123").unwrap();
//!     assert_eq!(id, "abc123:en:published");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `folio::core` - Domain types (Principal, Mode, DocRef, etc.)
//! - `folio::cache` - TTL cache abstraction and backends
//! - `folio::perms` - Permission evaluation and criteria

pub mod engine;
pub mod error;
pub mod negotiate;
pub mod request;
pub mod share;

// Re-export component crates
pub use folio_cache as cache;
pub use folio_core as core;
pub use folio_perms as perms;

// Re-export main types for convenience
pub use engine::{Engine, EngineConfig};
pub use error::{EngineError, ErrorBody, ErrorKind, Result};
pub use negotiate::Negotiator;
pub use request::{MemorySession, RequestParams, ResolvedContext, Session};
pub use share::{ShareLink, ShareService, DEFAULT_SHARE_LIFETIME, SHARE_NAMESPACE, SHARE_PARAM};

// Re-export commonly used core types
pub use folio_core::{Action, DocRef, Document, LocaleConfig, Mode, Principal, Visibility};
