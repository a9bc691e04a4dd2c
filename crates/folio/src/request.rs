//! Request-boundary types.
//!
//! The negotiator never mutates an ambient request object. It reads
//! [`RequestParams`] (the raw inbound query values) and returns a
//! [`ResolvedContext`], an immutable value threaded through later calls.
//! The only mutation at this boundary is the two-slot [`Session`].

use folio_core::Mode;

/// Raw inbound query values, plus the canonical request URL (path and
/// query, as issued). The combined `locale:mode` shorthand arrives in
/// `locale` and is split by the negotiator before anything else looks at
/// these values.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    /// The `locale` query parameter, verbatim.
    pub locale: Option<String>,
    /// The `mode` query parameter, verbatim.
    pub mode: Option<String>,
    /// The `share-token` query parameter, verbatim.
    pub share_token: Option<String>,
    /// Canonical request URL: path plus query string.
    pub url: String,
}

impl RequestParams {
    /// Parameters for a request to `url` with no query overrides.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the `locale` parameter.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the `mode` parameter.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Set the `share-token` parameter.
    pub fn with_share_token(mut self, token: impl Into<String>) -> Self {
        self.share_token = Some(token.into());
        self
    }
}

/// The request-bound session, reduced to the two scalar slots this core
/// reads and writes. Implementations wrap whatever session subsystem the
/// surrounding server uses.
pub trait Session: Send {
    /// The locale remembered from a prior request, if any.
    fn locale(&self) -> Option<String>;

    /// The mode remembered from a prior request, if any.
    fn mode(&self) -> Option<Mode>;

    /// Remember a locale for subsequent requests.
    fn set_locale(&mut self, locale: &str);

    /// Remember a mode for subsequent requests.
    fn set_mode(&mut self, mode: Mode);
}

/// A plain in-process session, for tests and embedders without a session
/// subsystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    locale: Option<String>,
    mode: Option<Mode>,
}

impl MemorySession {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Session for MemorySession {
    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn mode(&self) -> Option<Mode> {
        self.mode
    }

    fn set_locale(&mut self, locale: &str) {
        self.locale = Some(locale.to_string());
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
    }
}

/// The outcome of locale/mode negotiation for one request.
///
/// `explicit_locale` / `explicit_mode` record whether a query parameter
/// supplied the value; document-id rewriting gives explicitly requested
/// values precedence over values embedded in a composite id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    /// The resolved locale; always a member of the configured set.
    pub locale: String,
    /// The resolved publication mode.
    pub mode: Mode,
    /// Whether the request carried a `locale` query parameter.
    pub explicit_locale: bool,
    /// Whether the request carried a `mode` query parameter.
    pub explicit_mode: bool,
    /// Whether a valid share token granted draft visibility for this
    /// request's exact URL.
    pub draft_shared: bool,
}
