//! Proptest generators for property-based testing.

use proptest::prelude::*;

use folio_core::{Action, Document, LocaleConfig, Mode, Principal, Visibility};
use folio_perms::StaticRegistry;

/// Locale codes the generators draw from.
pub const LOCALE_POOL: &[&str] = &["en", "fr", "de", "es", "it"];

/// Document type keys the generators draw from.
pub const TYPE_POOL: &[&str] = &["article", "page", "user", "image", "tag"];

/// Generate a non-empty locale configuration drawn from [`LOCALE_POOL`].
pub fn locale_config() -> impl Strategy<Value = LocaleConfig> {
    proptest::sample::subsequence(LOCALE_POOL.to_vec(), 1..=LOCALE_POOL.len()).prop_map(
        |locales| {
            LocaleConfig::new(locales.into_iter().map(String::from).collect())
                .expect("subsequence is non-empty")
        },
    )
}

/// Generate a mode.
pub fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Draft), Just(Mode::Published)]
}

/// Generate a visibility.
pub fn visibility() -> impl Strategy<Value = Visibility> {
    prop_oneof![Just(Visibility::Public), Just(Visibility::LoginRequired)]
}

/// Generate a principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    prop_oneof![
        Just(Principal::Anonymous),
        "[a-z0-9]{1,12}".prop_map(Principal::user),
    ]
}

/// Generate an action key, including some the policy has never heard of.
pub fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::new(Action::VIEW)),
        Just(Action::new(Action::VIEW_DRAFT)),
        Just(Action::new(Action::EDIT)),
        Just(Action::new("publish")),
        "[a-z]{2,8}-[a-z]{2,8}".prop_map(Action::new),
    ]
}

/// Generate an action key other than plain `view`.
pub fn non_view_action() -> impl Strategy<Value = Action> {
    action().prop_filter("not the view action", |a| a.as_str() != Action::VIEW)
}

/// Generate a registry over [`TYPE_POOL`] with random admin-only flags.
pub fn registry() -> impl Strategy<Value = StaticRegistry> {
    proptest::collection::vec(any::<bool>(), TYPE_POOL.len()).prop_map(|flags| {
        TYPE_POOL
            .iter()
            .zip(flags)
            .fold(StaticRegistry::new(), |registry, (key, admin_only)| {
                registry.with_type(*key, admin_only)
            })
    })
}

/// Generate a document whose type is drawn from [`TYPE_POOL`].
pub fn document() -> impl Strategy<Value = Document> {
    (
        "[a-z0-9]{8}",
        proptest::sample::select(TYPE_POOL.to_vec()),
        visibility(),
        proptest::sample::select(LOCALE_POOL.to_vec()),
        mode(),
    )
        .prop_map(|(base, type_key, visibility, locale, mode)| {
            Document::new(
                format!("{base}:{locale}:{mode}"),
                type_key,
                visibility,
                locale,
                mode,
            )
        })
}

/// Generate a registry together with a batch of documents over its types.
pub fn registry_and_docs(
    max_docs: usize,
) -> impl Strategy<Value = (StaticRegistry, Vec<Document>)> {
    (registry(), proptest::collection::vec(document(), 0..=max_docs))
}
