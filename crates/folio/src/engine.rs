//! The Engine: unified API for the Folio core.
//!
//! Brings negotiation, permissions, and shared-draft links together into a
//! cohesive interface for the surrounding server. Each inbound request is
//! handled independently; the engine holds no per-request state, so one
//! instance serves all requests concurrently. The TTL cache is the only
//! shared resource, and tokens written to it are write-once.

use std::sync::Arc;
use std::time::Duration;

use folio_cache::Cache;
use folio_core::{Action, Document, LocaleConfig, Principal};
use folio_perms::{Criteria, PermissionEvaluator, Subject, TypeRegistry};

use crate::error::Result;
use crate::negotiate::Negotiator;
use crate::request::{RequestParams, ResolvedContext, Session};
use crate::share::{ShareLink, ShareService, DEFAULT_SHARE_LIFETIME};

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The supported locales and the default.
    pub locales: LocaleConfig,
    /// Lifetime of issued share tokens.
    pub share_lifetime: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locales: LocaleConfig::default(),
            share_lifetime: DEFAULT_SHARE_LIFETIME,
        }
    }
}

/// The main Engine struct.
///
/// Provides a unified API for:
/// - Resolving the locale and publication mode of a request
/// - Rewriting document ids that embed locale and mode
/// - Permission checks, query-filter synthesis, and batch annotation
/// - Issuing and redeeming shared-draft links
pub struct Engine<R: TypeRegistry> {
    registry: R,
    negotiator: Negotiator,
    shares: ShareService,
}

impl<R: TypeRegistry> Engine<R> {
    /// Create a new engine instance.
    pub fn new(registry: R, cache: Arc<dyn Cache>, config: EngineConfig) -> Self {
        Self {
            registry,
            negotiator: Negotiator::new(config.locales),
            shares: ShareService::with_lifetime(cache, config.share_lifetime),
        }
    }

    /// The type registry this engine consults.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// An evaluator borrowing this engine's registry.
    pub fn evaluator(&self) -> PermissionEvaluator<'_> {
        PermissionEvaluator::new(&self.registry)
    }

    /// Resolve the locale and mode for one request. See
    /// [`Negotiator::resolve`] for precedence and the draft gate.
    pub async fn resolve(
        &self,
        principal: &Principal,
        params: RequestParams,
        session: &mut dyn Session,
    ) -> Result<ResolvedContext> {
        self.negotiator
            .resolve(principal, params, session, &self.evaluator(), &self.shares)
            .await
    }

    /// Rewrite a document id against a resolved context. See
    /// [`Negotiator::rewrite_id`].
    pub fn rewrite_id(
        &self,
        ctx: &ResolvedContext,
        id: &str,
    ) -> Result<(String, ResolvedContext)> {
        self.negotiator.rewrite_id(ctx, id)
    }

    /// Whether `principal` can carry out `action` on `subject`.
    pub fn can(
        &self,
        principal: &Principal,
        action: &Action,
        subject: Option<Subject<'_>>,
    ) -> bool {
        self.evaluator().can(principal, action, subject)
    }

    /// A storage filter returning only documents `principal` may perform
    /// `action` on.
    pub fn criteria(&self, principal: &Principal, action: &Action) -> Criteria {
        self.evaluator().criteria(principal, action)
    }

    /// Mark each document the principal can perform `action` on with a
    /// `_{action}` field.
    pub fn annotate(&self, principal: &Principal, action: &Action, docs: &mut [Document]) {
        self.evaluator().annotate(principal, action, docs)
    }

    /// Issue a shareable draft link for `url` on behalf of `principal`.
    pub async fn issue_share_link(
        &self,
        principal: &Principal,
        url: &str,
    ) -> Result<ShareLink> {
        self.shares.issue(principal, &self.evaluator(), url).await
    }

    /// Redeem a presented share token against the requested URL.
    pub async fn validate_share(&self, token: &str, request_url: &str) -> Result<bool> {
        self.shares.validate(token, request_url).await
    }
}
