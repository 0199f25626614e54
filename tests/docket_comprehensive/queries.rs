//! Query semantics over the public API.

use crate::common::*;
use docket::DocketError;

#[test]
fn where_eq_returns_matching_notes_only() {
    init_tracing();
    let t = TestStore::new();
    let a1 = t.note(Some("a"), None);
    t.note(Some("b"), None);
    let a2 = t.note(Some("a"), None);

    let page = t
        .store
        .query(&Query::new("note").filter("sk1", Term::eq("a")))
        .unwrap();
    let mut ids: Vec<_> = page.documents.iter().map(|d| d.id.clone()).collect();
    let mut expected = vec![a1, a2];
    ids.sort();
    expected.sort();
    assert_eq!(ids, expected);
}

#[test]
fn queries_are_scoped_to_type() {
    let t = TestStore::new();
    t.note(Some("a"), None);
    t.store
        .insert("user", "1.0", Payload::new(), Some(Slots::new().with(SlotKey::Sk1, "a")))
        .unwrap();

    let page = t
        .store
        .query(&Query::new("user").filter("sk1", Term::eq("a")))
        .unwrap();
    assert_eq!(page.documents.len(), 1);
    assert!(page.documents.iter().all(|d| d.doc_type == "user"));
}

#[test]
fn range_list_and_negation_operators() {
    let t = TestStore::new();
    for v in ["a", "b", "c", "d"] {
        t.note(Some(v), None);
    }
    t.note(None, None);

    let count = |term: Term| {
        t.store
            .query(&Query::new("note").filter("sk1", term))
            .unwrap()
            .documents
            .len()
    };
    assert_eq!(count(Term::gt("b")), 2);
    assert_eq!(count(Term::gte("b")), 3);
    assert_eq!(count(Term::lt("b")), 1);
    assert_eq!(count(Term::lte("b")), 2);
    assert_eq!(count(Term::one_of(["a", "d", "z"])), 2);
    assert_eq!(count(Term::is_null()), 1);
    assert_eq!(count(Term::is_null().negate()), 4);
    assert_eq!(count(Term::eq("a").negate()), 4);
}

#[test]
fn contains_matches_tokens() {
    let t = TestStore::new();
    let both = t.note(Some("red, blue"), None);
    t.note(Some("red"), None);

    let page = t
        .store
        .query(&Query::new("note").filter("sk1", Term::contains_all(["red", "blue"])))
        .unwrap();
    let ids: Vec<_> = page.documents.into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![both]);
}

#[test]
fn text_search_is_case_insensitive() {
    let t = TestStore::new();
    t.store
        .insert(
            "note",
            "1.0",
            Payload::new(),
            Some(Slots::new().with_text("Quarterly Report draft")),
        )
        .unwrap();
    t.note(Some("x"), None);

    let page = t
        .store
        .query(&Query::new("note").text("REPORT"))
        .unwrap();
    assert_eq!(page.documents.len(), 1);
}

#[test]
fn non_indexed_key_and_oversized_take_are_configuration_errors() {
    let t = TestStore::new();
    let err = t
        .store
        .query(&Query::new("note").filter("title", Term::eq("x")))
        .unwrap_err();
    assert!(err.is_configuration());

    let err = t.store.query(&Query::new("note").take(1001)).unwrap_err();
    assert!(err.is_configuration());

    let err = t
        .store
        .query(&Query::new("note").order_by("title", Direction::Ascending))
        .unwrap_err();
    assert!(matches!(err, DocketError::Configuration { .. }));
}

#[test]
fn default_order_is_newest_first() {
    let t = TestStore::new();
    let ids: Vec<_> = (0..3)
        .map(|_| {
            let id = t.note(None, None);
            std::thread::sleep(std::time::Duration::from_millis(2));
            id
        })
        .collect();

    let page = t.store.query(&Query::new("note")).unwrap();
    let got: Vec<_> = page.documents.into_iter().map(|d| d.id).collect();
    let expected: Vec<_> = ids.into_iter().rev().collect();
    assert_eq!(got, expected);
}
