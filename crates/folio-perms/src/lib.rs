//! # Folio Perms
//!
//! Permission evaluation for Folio documents.
//!
//! Three operations, kept behaviorally consistent:
//!
//! - [`PermissionEvaluator::can`] - pure decision over (principal, action,
//!   subject)
//! - [`PermissionEvaluator::criteria`] - the same decision as a storage
//!   filter, applied across all subjects
//! - [`PermissionEvaluator::annotate`] - batch marker for display data
//!
//! The [`TypeRegistry`] trait is the seam to the surrounding system's
//! per-type managers; this crate never mutates it.

pub mod criteria;
pub mod evaluator;
pub mod registry;

pub use criteria::{Criteria, NEVER_MATCH_ID};
pub use evaluator::{PermissionEvaluator, Subject};
pub use registry::{StaticRegistry, TypeRegistry};
