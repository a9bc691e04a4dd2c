//! Locale/mode negotiation.
//!
//! Runs first on every request: decides which locale and publication mode
//! the request addresses, gates draft mode behind the `view-draft` action
//! (or a valid share token), and rewrites document ids that embed their
//! own locale and mode.

use folio_core::{Action, DocRef, LocaleConfig, Mode, Principal};
use folio_perms::PermissionEvaluator;

use crate::error::{EngineError, Result};
use crate::request::{RequestParams, ResolvedContext, Session};
use crate::share::ShareService;

/// Resolves `(locale, mode)` for each request and rewrites composite
/// document ids. Stateless over its inputs; one negotiator serves any
/// number of concurrent requests.
pub struct Negotiator {
    config: LocaleConfig,
}

impl Negotiator {
    /// Create a negotiator over the configured locales.
    pub fn new(config: LocaleConfig) -> Self {
        Self { config }
    }

    /// The locale configuration.
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// Normalize the combined `locale=code:mode` shorthand into the
    /// canonical two-parameter form. Documents carry their locale in that
    /// combined shape, so links pasted from document ids arrive this way.
    /// The shorthand's mode half lands in the `mode` slot, replacing any
    /// explicit `mode` parameter presented alongside it.
    pub fn split_combined(mut params: RequestParams) -> RequestParams {
        if let Some(combined) = params.locale.as_deref() {
            if let Some((locale, mode)) = combined.split_once(':') {
                params.mode = Some(mode.to_string());
                params.locale = Some(locale.to_string());
            }
        }
        params
    }

    /// Resolve the locale and mode for one request.
    ///
    /// Locale precedence: supported query value, then supported session
    /// value, then the configured default. Unsupported values fall through
    /// silently; negotiation never fails over a locale. Mode precedence is
    /// the same with `published` as the final default.
    ///
    /// Draft mode is gated: a valid share token for this exact URL forces
    /// draft and bypasses the permission check; otherwise the principal
    /// must hold `view-draft` or resolution fails with a forbidden error —
    /// never a silent downgrade to published.
    ///
    /// The winning locale and the negotiated (pre-share) mode are written
    /// back to the session so subsequent parameter-less requests stick; a
    /// share-forced draft never outlives its own request.
    pub async fn resolve(
        &self,
        principal: &Principal,
        params: RequestParams,
        session: &mut dyn Session,
        perms: &PermissionEvaluator<'_>,
        shares: &ShareService,
    ) -> Result<ResolvedContext> {
        let params = Self::split_combined(params);

        let explicit_locale = params.locale.is_some();
        let locale = match params.locale.as_deref() {
            Some(requested) if self.config.is_supported(requested) => requested.to_string(),
            requested => {
                if let Some(requested) = requested {
                    tracing::debug!(requested, "unsupported locale, falling back");
                }
                match session.locale() {
                    Some(remembered) if self.config.is_supported(&remembered) => remembered,
                    _ => self.config.default_locale().to_string(),
                }
            }
        };

        let explicit_mode = params.mode.is_some();
        let mut mode = params
            .mode
            .as_deref()
            .and_then(Mode::parse_opt)
            .or_else(|| session.mode())
            .unwrap_or_default();

        // A valid share token unconditionally forces draft mode for the
        // exact URL it was issued for, bypassing the permission gate. The
        // grant is URL-bound, so only the negotiated mode may stick in the
        // session; a shared-draft visitor's next plain request must fall
        // back to normal rules, not inherit draft.
        let negotiated_mode = mode;
        let mut draft_shared = false;
        if let Some(token) = params.share_token.as_deref() {
            if shares.validate(token, &params.url).await? {
                mode = Mode::Draft;
                draft_shared = true;
            }
            // Absent, expired, or mismatched: the share attempt is void
            // and normal permission rules apply below.
        }

        if mode == Mode::Draft
            && !draft_shared
            && !perms.can(principal, &Action::new(Action::VIEW_DRAFT), None)
        {
            return Err(EngineError::Forbidden);
        }

        session.set_locale(&locale);
        session.set_mode(negotiated_mode);

        Ok(ResolvedContext {
            locale,
            mode,
            explicit_locale,
            explicit_mode,
            draft_shared,
        })
    }

    /// Infer locale and mode from a document id, or complete the id from
    /// the resolved context.
    ///
    /// A composite `base:locale:mode` id carries its own locale and mode:
    /// each is adopted into the returned context unless the request
    /// explicitly asked for that value, in which case the request's value
    /// is substituted into the id instead. A bare id is completed from the
    /// context. A shortcut like `_home` passes through unchanged.
    ///
    /// Pure: the input context is never mutated; an updated copy comes
    /// back alongside the rewritten id.
    pub fn rewrite_id(
        &self,
        ctx: &ResolvedContext,
        id: &str,
    ) -> Result<(String, ResolvedContext)> {
        let parsed = DocRef::parse(id, &self.config)?;
        let mut out = ctx.clone();

        let rewritten = match parsed {
            DocRef::Shortcut { raw } => raw,
            DocRef::Bare { base } => DocRef::Composite {
                base,
                locale: out.locale.clone(),
                mode: out.mode,
            }
            .render(),
            DocRef::Composite { base, locale, mode } => {
                let locale = if ctx.explicit_locale {
                    out.locale.clone()
                } else {
                    out.locale = locale.clone();
                    locale
                };
                let mode = if ctx.explicit_mode {
                    out.mode
                } else {
                    out.mode = mode;
                    mode
                };
                DocRef::Composite { base, locale, mode }.render()
            }
        };

        Ok((rewritten, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use folio_cache::MemoryCache;
    use folio_perms::StaticRegistry;

    use crate::request::MemorySession;

    fn negotiator() -> Negotiator {
        Negotiator::new(LocaleConfig::new(vec!["en".into(), "fr".into()]).unwrap())
    }

    fn shares() -> ShareService {
        ShareService::new(Arc::new(MemoryCache::new()))
    }

    fn registry() -> StaticRegistry {
        StaticRegistry::new().with_type("article", false)
    }

    async fn resolve(
        principal: &Principal,
        params: RequestParams,
        session: &mut MemorySession,
    ) -> Result<ResolvedContext> {
        let registry = registry();
        let perms = PermissionEvaluator::new(&registry);
        negotiator()
            .resolve(principal, params, session, &perms, &shares())
            .await
    }

    #[tokio::test]
    async fn test_defaults_with_no_input() {
        let ctx = resolve(
            &Principal::Anonymous,
            RequestParams::new("/page"),
            &mut MemorySession::new(),
        )
        .await
        .unwrap();

        assert_eq!(ctx.locale, "en");
        assert_eq!(ctx.mode, Mode::Published);
        assert!(!ctx.explicit_locale);
        assert!(!ctx.draft_shared);
    }

    #[tokio::test]
    async fn test_query_locale_wins_over_session() {
        let mut session = MemorySession::new();
        session.set_locale("en");

        let ctx = resolve(
            &Principal::Anonymous,
            RequestParams::new("/page").with_locale("fr"),
            &mut session,
        )
        .await
        .unwrap();

        assert_eq!(ctx.locale, "fr");
        assert!(ctx.explicit_locale);
        // And the winner sticks for the next request.
        assert_eq!(session.locale(), Some("fr".to_string()));
    }

    #[tokio::test]
    async fn test_unsupported_locale_falls_back_silently() {
        for bad in ["de", "EN", "", "xx-YY"] {
            let ctx = resolve(
                &Principal::Anonymous,
                RequestParams::new("/page").with_locale(bad),
                &mut MemorySession::new(),
            )
            .await
            .unwrap();
            assert_eq!(ctx.locale, "en", "no fallback for {bad:?}");
        }
    }

    #[tokio::test]
    async fn test_unsupported_session_locale_falls_back() {
        let mut session = MemorySession::new();
        session.set_locale("de");

        let ctx = resolve(&Principal::Anonymous, RequestParams::new("/page"), &mut session)
            .await
            .unwrap();
        assert_eq!(ctx.locale, "en");
    }

    #[tokio::test]
    async fn test_combined_shorthand_sets_both() {
        let ctx = resolve(
            &Principal::user("u1"),
            RequestParams::new("/page").with_locale("fr:draft"),
            &mut MemorySession::new(),
        )
        .await
        .unwrap();

        assert_eq!(ctx.locale, "fr");
        assert_eq!(ctx.mode, Mode::Draft);
    }

    #[tokio::test]
    async fn test_combined_shorthand_mode_half_replaces_explicit_mode() {
        let ctx = resolve(
            &Principal::user("u1"),
            RequestParams::new("/page")
                .with_locale("fr:draft")
                .with_mode("published"),
            &mut MemorySession::new(),
        )
        .await
        .unwrap();

        assert_eq!(ctx.mode, Mode::Draft);
    }

    #[tokio::test]
    async fn test_session_mode_applies_without_params() {
        let mut session = MemorySession::new();
        session.set_mode(Mode::Draft);

        let ctx = resolve(&Principal::user("u1"), RequestParams::new("/page"), &mut session)
            .await
            .unwrap();
        assert_eq!(ctx.mode, Mode::Draft);
    }

    #[tokio::test]
    async fn test_draft_forbidden_for_anonymous() {
        let err = resolve(
            &Principal::Anonymous,
            RequestParams::new("/page").with_mode("draft"),
            &mut MemorySession::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, EngineError::Forbidden));
        assert_eq!(err.http_status(), 403);
    }

    #[tokio::test]
    async fn test_invalid_mode_falls_back_to_published() {
        let ctx = resolve(
            &Principal::Anonymous,
            RequestParams::new("/page").with_mode("liveish"),
            &mut MemorySession::new(),
        )
        .await
        .unwrap();
        assert_eq!(ctx.mode, Mode::Published);
    }

    #[tokio::test]
    async fn test_valid_share_token_forces_draft_for_anonymous() {
        let cache = Arc::new(MemoryCache::new());
        let shares = ShareService::new(cache.clone());
        let registry = registry();
        let perms = PermissionEvaluator::new(&registry);

        let link = shares
            .issue(&Principal::user("u1"), &perms, "/page")
            .await
            .unwrap();
        let token = link.url.split('=').next_back().unwrap().to_string();

        let ctx = negotiator()
            .resolve(
                &Principal::Anonymous,
                RequestParams::new(link.url.clone()).with_share_token(token),
                &mut MemorySession::new(),
                &perms,
                &shares,
            )
            .await
            .unwrap();

        assert_eq!(ctx.mode, Mode::Draft);
        assert!(ctx.draft_shared);
    }

    #[tokio::test]
    async fn test_stale_share_token_is_dropped_and_rules_apply() {
        let registry = registry();
        let perms = PermissionEvaluator::new(&registry);

        // Token never issued: published request proceeds normally...
        let ctx = negotiator()
            .resolve(
                &Principal::Anonymous,
                RequestParams::new("/page?share-token=stale").with_share_token("stale"),
                &mut MemorySession::new(),
                &perms,
                &shares(),
            )
            .await
            .unwrap();
        assert_eq!(ctx.mode, Mode::Published);
        assert!(!ctx.draft_shared);

        // ...but it cannot stand in for view-draft permission.
        let err = negotiator()
            .resolve(
                &Principal::Anonymous,
                RequestParams::new("/page?share-token=stale")
                    .with_share_token("stale")
                    .with_mode("draft"),
                &mut MemorySession::new(),
                &perms,
                &shares(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Forbidden));
    }

    #[tokio::test]
    async fn test_share_forced_draft_does_not_stick_in_session() {
        let cache = Arc::new(MemoryCache::new());
        let shares = ShareService::new(cache.clone());
        let registry = registry();
        let perms = PermissionEvaluator::new(&registry);
        let negotiator = negotiator();
        let mut session = MemorySession::new();

        let link = shares
            .issue(&Principal::user("u1"), &perms, "/page")
            .await
            .unwrap();
        let token = link.url.split('=').next_back().unwrap().to_string();

        let ctx = negotiator
            .resolve(
                &Principal::Anonymous,
                RequestParams::new(link.url.clone()).with_share_token(token),
                &mut session,
                &perms,
                &shares,
            )
            .await
            .unwrap();
        assert_eq!(ctx.mode, Mode::Draft);

        // Only the negotiated mode sticks, so the next plain request on
        // the same session resolves normally instead of tripping the
        // draft gate.
        assert_eq!(session.mode(), Some(Mode::Published));
        let ctx = negotiator
            .resolve(
                &Principal::Anonymous,
                RequestParams::new("/page/other"),
                &mut session,
                &perms,
                &shares,
            )
            .await
            .unwrap();
        assert_eq!(ctx.mode, Mode::Published);
        assert!(!ctx.draft_shared);
    }

    #[tokio::test]
    async fn test_share_token_bound_to_exact_url() {
        let cache = Arc::new(MemoryCache::new());
        let shares = ShareService::new(cache.clone());
        let registry = registry();
        let perms = PermissionEvaluator::new(&registry);

        let link = shares
            .issue(&Principal::user("u1"), &perms, "/page")
            .await
            .unwrap();
        let token = link.url.split('=').next_back().unwrap().to_string();

        let ctx = negotiator()
            .resolve(
                &Principal::Anonymous,
                RequestParams::new(format!("/other?share-token={token}"))
                    .with_share_token(token),
                &mut MemorySession::new(),
                &perms,
                &shares,
            )
            .await
            .unwrap();

        assert_eq!(ctx.mode, Mode::Published);
        assert!(!ctx.draft_shared);
    }

    fn ctx(locale: &str, mode: Mode, explicit_locale: bool, explicit_mode: bool) -> ResolvedContext {
        ResolvedContext {
            locale: locale.to_string(),
            mode,
            explicit_locale,
            explicit_mode,
            draft_shared: false,
        }
    }

    #[test]
    fn test_rewrite_composite_adopts_into_context() {
        let (id, out) = negotiator()
            .rewrite_id(&ctx("en", Mode::Published, false, false), "abc123:fr:draft")
            .unwrap();

        assert_eq!(id, "abc123:fr:draft");
        assert_eq!(out.locale, "fr");
        assert_eq!(out.mode, Mode::Draft);
    }

    #[test]
    fn test_rewrite_composite_explicit_request_wins() {
        let (id, out) = negotiator()
            .rewrite_id(&ctx("en", Mode::Published, true, true), "abc123:fr:draft")
            .unwrap();

        assert_eq!(id, "abc123:en:published");
        assert_eq!(out.locale, "en");
        assert_eq!(out.mode, Mode::Published);
    }

    #[test]
    fn test_rewrite_composite_mixed_precedence() {
        // Explicit locale, inferred mode.
        let (id, out) = negotiator()
            .rewrite_id(&ctx("en", Mode::Published, true, false), "abc123:fr:draft")
            .unwrap();

        assert_eq!(id, "abc123:en:draft");
        assert_eq!(out.locale, "en");
        assert_eq!(out.mode, Mode::Draft);
    }

    #[test]
    fn test_rewrite_is_idempotent_without_overrides() {
        let negotiator = negotiator();
        let start = ctx("en", Mode::Published, false, false);

        let (first, after) = negotiator.rewrite_id(&start, "abc123:fr:draft").unwrap();
        let (second, _) = negotiator.rewrite_id(&after, &first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rewrite_bare_completes_from_context() {
        let (id, out) = negotiator()
            .rewrite_id(&ctx("en", Mode::Published, false, false), "abc123")
            .unwrap();

        assert_eq!(id, "abc123:en:published");
        assert_eq!(out.locale, "en");
    }

    #[test]
    fn test_rewrite_shortcut_unchanged() {
        let (id, out) = negotiator()
            .rewrite_id(&ctx("fr", Mode::Draft, true, true), "_home")
            .unwrap();

        assert_eq!(id, "_home");
        assert_eq!(out.locale, "fr");
    }

    #[test]
    fn test_rewrite_rejects_malformed_composite() {
        assert!(negotiator()
            .rewrite_id(&ctx("en", Mode::Published, false, false), "abc123:de:draft")
            .is_err());
    }
}
