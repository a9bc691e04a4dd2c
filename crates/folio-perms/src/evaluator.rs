//! The permission evaluator.
//!
//! The current model is deliberately coarse: logged-in principals can do
//! anything, and the public can only view content that is both publicly
//! visible and of a type that is not admin-only. Finer roles will refine
//! the `Authenticated` arm; everything funnels through [`can`] and
//! [`criteria`], so the refinement happens in exactly one place.
//!
//! [`can`]: PermissionEvaluator::can
//! [`criteria`]: PermissionEvaluator::criteria

use serde_json::Value;

use folio_core::{Action, Document, Principal, Visibility};

use crate::criteria::Criteria;
use crate::registry::TypeRegistry;

/// The subject of a permission check: a concrete document instance, or a
/// document type when the question is type-level ("could this principal
/// ever act on such a document?").
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    /// A document type key.
    Type(&'a str),
    /// A concrete document instance.
    Doc(&'a Document),
}

impl<'a> Subject<'a> {
    fn type_key(&self) -> &str {
        match self {
            Subject::Type(key) => key,
            Subject::Doc(doc) => &doc.type_key,
        }
    }
}

impl<'a> From<&'a Document> for Subject<'a> {
    fn from(doc: &'a Document) -> Self {
        Subject::Doc(doc)
    }
}

/// Pure decision function over (principal, action, subject), plus the
/// matching query-filter synthesizer and a batch-annotation helper.
///
/// Borrows the type registry; holds no other state, so one evaluator may
/// serve any number of concurrent requests.
pub struct PermissionEvaluator<'r> {
    registry: &'r dyn TypeRegistry,
}

impl<'r> PermissionEvaluator<'r> {
    /// Create an evaluator over the given registry.
    pub fn new(registry: &'r dyn TypeRegistry) -> Self {
        Self { registry }
    }

    /// Determine whether `principal` can carry out `action` on `subject`.
    ///
    /// With a [`Subject::Doc`] the check covers that particular document;
    /// with a [`Subject::Type`] it asks whether the principal could
    /// potentially act on documents of that type. Actions that are not
    /// specific to particular documents, for instance `view-draft`, take
    /// no subject at all.
    ///
    /// The document need not exist in storage yet. See also [`criteria`],
    /// which expresses the same decision as a storage filter.
    ///
    /// [`criteria`]: Self::criteria
    pub fn can(&self, principal: &Principal, action: &Action, subject: Option<Subject<'_>>) -> bool {
        if principal.is_authenticated() {
            return true;
        }
        if action.as_str() != Action::VIEW {
            // The public can only view for now. New special actions get
            // the safe default without any code here.
            return false;
        }
        let Some(subject) = subject else {
            // Nothing to restrict on: no type to be admin-only.
            return true;
        };
        if self.registry.is_admin_only(subject.type_key()) {
            return false;
        }
        match subject {
            Subject::Doc(doc) => doc.visibility == Visibility::Public,
            Subject::Type(_) => true,
        }
    }

    /// Build a filter that retrieves only documents the principal is
    /// allowed to perform `action` on.
    ///
    /// For every document `d`, `can(p, "view", Some(d.into()))` equals
    /// `criteria(p, "view").matches(&d)`.
    pub fn criteria(&self, principal: &Principal, action: &Action) -> Criteria {
        if principal.is_authenticated() {
            // For now, users can do anything.
            return Criteria::All;
        }
        if action.as_str() != Action::VIEW {
            return Criteria::Nothing;
        }
        Criteria::Filter {
            visibility: Visibility::Public,
            type_nin: self.registry.admin_only_types(),
        }
    }

    /// For each document the principal can perform `action` on, set a
    /// marker field named `_{action}` (note the underscore, which keeps
    /// markers clear of document data). Documents are never removed or
    /// reordered; this augments display data, it does not filter.
    ///
    /// Most often used after fetching viewable documents, to flag which of
    /// them the principal could also edit.
    pub fn annotate(&self, principal: &Principal, action: &Action, docs: &mut [Document]) {
        let marker = format!("_{}", action);
        for doc in docs.iter_mut() {
            if self.can(principal, action, Some(Subject::Doc(doc))) {
                doc.extra.insert(marker.clone(), Value::Bool(true));
            }
        }
    }
}
