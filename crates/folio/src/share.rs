//! Shared-draft token service.
//!
//! A share token lets an authorized principal hand draft visibility for
//! one exact URL to an unauthenticated viewer, without granting general
//! draft access. Tokens are unguessable bearer secrets stored in the TTL
//! cache under a dedicated namespace; expiry is the only destruction path.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;

use folio_cache::Cache;
use folio_core::{Action, Principal};
use folio_perms::PermissionEvaluator;

use crate::error::{EngineError, Result};

/// Cache namespace for share tokens.
pub const SHARE_NAMESPACE: &str = "shared-drafts";

/// Query parameter carrying a share token.
pub const SHARE_PARAM: &str = "share-token";

/// Default lifetime of a shared draft URL is 1 week.
pub const DEFAULT_SHARE_LIFETIME: Duration = Duration::from_secs(86400 * 7);

/// A successfully issued share link.
#[derive(Debug, Clone, Serialize)]
pub struct ShareLink {
    /// The shareable URL, with the token appended.
    pub url: String,
}

/// Issues and redeems shared-draft tokens against the TTL cache.
pub struct ShareService {
    cache: Arc<dyn Cache>,
    lifetime: Duration,
}

impl ShareService {
    /// Create a service with the default one-week lifetime.
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self::with_lifetime(cache, DEFAULT_SHARE_LIFETIME)
    }

    /// Create a service with a custom token lifetime.
    pub fn with_lifetime(cache: Arc<dyn Cache>, lifetime: Duration) -> Self {
        Self { cache, lifetime }
    }

    /// Issue a share link for `raw_url` on behalf of `principal`.
    ///
    /// Requires the `view-draft` action. The URL is laundered: any
    /// fragment and any existing `share-token` parameter are stripped, and
    /// what remains must be a non-empty path starting with `/`. The
    /// stored URL is the canonical form the token
    /// will later be compared against, so callers must request exactly the
    /// URL they will serve.
    pub async fn issue(
        &self,
        principal: &Principal,
        perms: &PermissionEvaluator<'_>,
        raw_url: &str,
    ) -> Result<ShareLink> {
        if !perms.can(principal, &Action::new(Action::VIEW_DRAFT), None) {
            return Err(EngineError::Forbidden);
        }

        let url = launder_share_url(raw_url)?;
        let token = new_token_id();
        self.cache
            .set(SHARE_NAMESPACE, &token, &url, self.lifetime)
            .await?;

        Ok(ShareLink {
            url: append_share_param(&url, &token),
        })
    }

    /// Redeem a presented token against the URL actually being requested.
    ///
    /// Returns `Ok(true)` only when the token exists and was issued for
    /// exactly `request_url` minus its `share-token` parameter. An absent
    /// (expired or never issued) or mismatched token is `Ok(false)` — the
    /// caller drops the share attempt and normal permission rules apply.
    /// A cache failure is an error, not a miss.
    pub async fn validate(&self, token: &str, request_url: &str) -> Result<bool> {
        let Some(stored) = self.cache.get(SHARE_NAMESPACE, token).await? else {
            return Ok(false);
        };
        let presented = strip_share_param(request_url);
        if stored == presented {
            Ok(true)
        } else {
            tracing::warn!(%stored, %presented, "share token URL mismatch");
            Ok(false)
        }
    }
}

/// Strip the fragment and any existing `share-token` parameter (re-sharing
/// a received link is fine), then require a non-empty path starting with
/// `/`. The result is the canonical URL the new token validates against.
fn launder_share_url(raw: &str) -> Result<String> {
    let url = raw.split('#').next().unwrap_or("");
    let url = strip_share_param(url);
    if url.is_empty() || !url.starts_with('/') {
        return Err(EngineError::Invalid(format!("not a shareable URL: {raw}")));
    }
    Ok(url)
}

/// Append `share-token=<token>`, joining with `?` or `&` as needed.
fn append_share_param(url: &str, token: &str) -> String {
    if url.contains('?') {
        format!("{url}&{SHARE_PARAM}={token}")
    } else {
        format!("{url}?{SHARE_PARAM}={token}")
    }
}

/// Remove the `share-token` parameter and its separator from a URL.
///
/// Comparison with the stored URL is exact-string beyond this: parameter
/// order, trailing slashes, casing, and percent-encoding are preserved, so
/// a link must be consumed exactly as it was issued.
pub fn strip_share_param(url: &str) -> String {
    let Some((path, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let rest: Vec<&str> = query
        .split('&')
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or(pair);
            key != SHARE_PARAM
        })
        .collect();
    if rest.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, rest.join("&"))
    }
}

/// A globally unique, unguessable token id: 128 bits from the OS RNG.
fn new_token_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
