//! Smoke tests driving the engine through the shared fixture.

use folio::{Mode, Principal, RequestParams, Visibility};
use folio_core::Document;
use folio_testkit::TestFixture;

#[tokio::test]
async fn fixture_engine_resolves_defaults() {
    let fixture = TestFixture::new();
    let mut session = fixture.session();

    let ctx = fixture
        .engine
        .resolve(&Principal::Anonymous, RequestParams::new("/"), &mut session)
        .await
        .unwrap();

    assert_eq!(ctx.locale, "en");
    assert_eq!(ctx.mode, Mode::Published);
}

#[tokio::test]
async fn fixture_docs_serialize_with_annotations() {
    let fixture = TestFixture::new();
    let mut docs = vec![fixture.make_doc("a1", "article")];

    fixture
        .engine
        .annotate(&Principal::user("u1"), &"edit".into(), &mut docs);

    let json = serde_json::to_value(&docs[0]).unwrap();
    assert_eq!(json["_edit"], serde_json::json!(true));
    assert_eq!(json["type"], "article");
}

#[tokio::test]
async fn fixture_admin_only_type_never_leaks_to_anonymous() {
    let fixture = TestFixture::new();
    let secret = Document::new("u9:en:published", "user", Visibility::Public, "en", Mode::Published);

    let criteria = fixture
        .engine
        .criteria(&Principal::Anonymous, &"view".into());
    assert!(!criteria.matches(&secret));
    assert_eq!(
        criteria.to_query()["type"]["$nin"],
        serde_json::json!(["user"])
    );
}
