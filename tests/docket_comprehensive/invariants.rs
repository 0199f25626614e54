//! Document invariants across updates and removal.

use crate::common::*;
use serde_json::json;
use std::time::Duration;

#[test]
fn removed_documents_never_come_back() {
    let t = TestStore::new();
    let keep = t.note(Some("a"), None);
    let gone = t.note(Some("a"), None);
    t.store.remove(&gone).unwrap();

    let ids: Vec<_> = t
        .store
        .query(&Query::new("note").filter("sk1", Term::eq("a")))
        .unwrap()
        .documents
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![keep]);
    assert!(t.store.get(&gone).unwrap_err().is_not_found());
    assert!(t.store.remove(&gone).unwrap_err().is_not_found());
}

#[test]
fn created_at_fixed_updated_at_moves_forward() {
    let t = TestStore::new();
    let id = t.note(Some("a"), None);
    let original = t.store.get(&id).unwrap();
    assert_eq!(original.created_at, original.updated_at);

    let mut last = original.updated_at;
    for i in 0..3 {
        std::thread::sleep(Duration::from_millis(1));
        let doc = t.store.update(&id, payload(json!({ "n": i })), None).unwrap();
        assert_eq!(doc.created_at, original.created_at);
        assert!(doc.updated_at >= last);
        last = doc.updated_at;
    }
}

#[test]
fn update_merges_one_key() {
    let t = TestStore::new();
    let doc = t
        .store
        .insert("note", "1.0", payload(json!({"a": 1, "b": 2, "c": {"d": 3}})), None)
        .unwrap();

    t.store.update(&doc.id, payload(json!({"b": 20})), None).unwrap();
    let stored = t.store.get(&doc.id).unwrap();
    assert_eq!(stored.data["a"], 1);
    assert_eq!(stored.data["b"], 20);
    assert_eq!(stored.data["c"]["d"], 3);
    assert_eq!(stored.doc_type, "note");
    assert_eq!(stored.version, "1.0");
}

#[test]
fn update_slot_override_is_queryable() {
    let t = TestStore::new();
    let id = t.note(Some("old"), Some("keep"));
    t.store
        .update(&id, Payload::new(), Some(Slots::new().with(SlotKey::Sk1, "new")))
        .unwrap();

    let find = |v: &str| {
        t.store
            .query(&Query::new("note").filter("sk1", Term::eq(v)))
            .unwrap()
            .documents
            .len()
    };
    assert_eq!(find("old"), 0);
    assert_eq!(find("new"), 1);
    assert_eq!(t.store.get(&id).unwrap().sk2.as_deref(), Some("keep"));
}

#[test]
fn update_missing_is_not_found() {
    let t = TestStore::new();
    let err = t
        .store
        .update(&DocumentId::new("nope"), Payload::new(), None)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn every_query_releases_its_scan() {
    let t = TestStore::new();
    for _ in 0..5 {
        t.note(Some("a"), None);
    }
    t.store.query(&Query::new("note").take(1)).unwrap();
    let _ = t.store.query(&Query::new("note").after("garbage"));
    assert_eq!(t.adapter.open_scans(), 0);
}
