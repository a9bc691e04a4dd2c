//! # Folio Testkit
//!
//! Testing utilities for the Folio workspace: proptest generators over
//! the domain types and ready-made engine fixtures. The property suites
//! that pin the core laws (`can`/`criteria` consistency, deny-by-default
//! filters, locale fallback) live in this crate's `tests/` directory.

pub mod fixtures;
pub mod generators;

pub use fixtures::TestFixture;
