//! # Folio Core
//!
//! Pure domain types for the Folio access-control and variant-resolution
//! engine: principals, actions, locales, publication modes, document
//! references, and documents.
//!
//! This crate contains no I/O, no caching, no request handling. It is pure
//! computation over content-system identity.
//!
//! ## Key Types
//!
//! - [`Principal`] - The acting identity (anonymous or authenticated)
//! - [`Action`] - An opaque capability key such as `view` or `view-draft`
//! - [`DocRef`] - Document identity, parsed once into a sum type
//! - [`Mode`] - Draft vs. published
//! - [`LocaleConfig`] - The ordered set of supported locales

pub mod doc;
pub mod docref;
pub mod error;
pub mod locale;
pub mod migrate;
pub mod principal;

pub use doc::{Document, Visibility};
pub use docref::{DocRef, SHORTCUT_SENTINEL};
pub use error::{CoreError, Result};
pub use locale::{LocaleConfig, Mode};
pub use migrate::retire_published_field;
pub use principal::{Action, Principal};
