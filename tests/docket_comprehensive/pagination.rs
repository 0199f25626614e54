//! Cursor pagination: completeness, tie-breaking and cursor validation.

use crate::common::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn all_ids(t: &TestStore, query: &Query) -> Vec<DocumentId> {
    t.store.query(&query.clone().take(1000)).unwrap().documents.into_iter().map(|d| d.id).collect()
}

#[test]
fn take_one_walk_equals_single_page() {
    let t = TestStore::new();
    for i in 0..25 {
        let sk1 = ["a", "b", "c"][i % 3];
        let sk2 = if i % 4 == 0 { None } else { Some("x") };
        t.note(Some(sk1), sk2);
    }
    let query = Query::new("note")
        .filter("sk1", Term::one_of(["a", "c"]))
        .order_by("sk2", Direction::Descending)
        .order_by("sk1", Direction::Ascending);

    let walked = t.collect_pages(&query, 1);
    assert_eq!(walked, all_ids(&t, &query));
    let unique: HashSet<_> = walked.iter().collect();
    assert_eq!(unique.len(), walked.len());
}

#[test]
fn identical_sort_keys_come_back_by_id() {
    let t = TestStore::new();
    for _ in 0..10 {
        t.note(Some("same"), None);
    }
    for direction in [Direction::Ascending, Direction::Descending] {
        let query = Query::new("note").order_by("sk1", direction);
        let ids = t.collect_pages(&query, 3);
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}

#[test]
fn full_page_carries_cursor_short_page_does_not() {
    let t = TestStore::new();
    for _ in 0..4 {
        t.note(Some("a"), None);
    }
    let page = t.store.query(&Query::new("note").take(2)).unwrap();
    assert!(page.pagination.next_cursor.is_some());
    let page = t.store.query(&Query::new("note").take(5)).unwrap();
    assert!(page.pagination.next_cursor.is_none());
}

#[test]
fn cursor_from_ascending_rejected_for_descending() {
    let t = TestStore::new();
    for v in ["a", "b", "c"] {
        t.note(Some(v), None);
    }
    let page = t
        .store
        .query(&Query::new("note").order_by("sk1", Direction::Ascending).take(1))
        .unwrap();
    let cursor = page.pagination.next_cursor.unwrap();

    let err = t
        .store
        .query(
            &Query::new("note")
                .order_by("sk1", Direction::Descending)
                .take(1)
                .after(cursor.clone()),
        )
        .unwrap_err();
    assert!(err.is_invalid_cursor());

    let err = t
        .store
        .query(&Query::new("user").order_by("sk1", Direction::Ascending).after(cursor))
        .unwrap_err();
    assert!(err.is_invalid_cursor());

    let err = t
        .store
        .query(&Query::new("note").after("not-a-cursor"))
        .unwrap_err();
    assert!(err.is_invalid_cursor());
}

#[test]
fn removal_between_pages_skips_removed_id() {
    let t = TestStore::new();
    let ids: Vec<_> = ["a", "b", "c", "d"].iter().map(|v| t.note(Some(v), None)).collect();
    let query = Query::new("note").order_by("sk1", Direction::Ascending).take(2);

    let first = t.store.query(&query).unwrap();
    let cursor = first.pagination.next_cursor.clone().unwrap();
    t.store.remove(&ids[2]).unwrap();

    let second = t.store.query(&query.clone().after(cursor)).unwrap();
    let got: Vec<_> = second.documents.into_iter().map(|d| d.id).collect();
    assert_eq!(got, vec![ids[3].clone()]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pagination_is_complete_for_any_page_size(
        values in prop::collection::vec(prop::option::of("[a-c]"), 0..40),
        take in 1usize..7,
        descending in any::<bool>(),
    ) {
        let t = TestStore::new();
        for v in &values {
            t.note(v.as_deref(), None);
        }
        let direction = if descending { Direction::Descending } else { Direction::Ascending };
        let query = Query::new("note").order_by("sk1", direction);

        let by_one = t.collect_pages(&query, 1);
        let by_take = t.collect_pages(&query, take);
        let by_thousand = t.collect_pages(&query, 1000);

        prop_assert_eq!(by_one.len(), values.len());
        prop_assert_eq!(&by_one, &by_thousand);
        prop_assert_eq!(&by_take, &by_thousand);
    }

    #[test]
    fn default_order_pagination_is_complete(
        count in 0usize..40,
        take in 1usize..7,
    ) {
        let t = TestStore::new();
        let mut inserted: Vec<_> = (0..count).map(|_| t.note(Some("a"), None)).collect();
        let query = Query::new("note");

        let by_one = t.collect_pages(&query, 1);
        let by_take = t.collect_pages(&query, take);
        let by_thousand = t.collect_pages(&query, 1000);

        prop_assert_eq!(&by_one, &by_thousand);
        prop_assert_eq!(&by_take, &by_thousand);
        let mut walked = by_one.clone();
        walked.sort();
        inserted.sort();
        prop_assert_eq!(walked, inserted);
    }

    #[test]
    fn filtered_text_search_pagination_is_complete(
        docs in prop::collection::vec(
            (prop::option::of("[a-c]"), prop::option::of("[axX ]{0,4}")),
            0..40,
        ),
        take in 1usize..7,
    ) {
        let t = TestStore::new();
        let mut expected = HashSet::new();
        for (sk1, text) in &docs {
            let mut slots = Slots::new();
            if let Some(v) = sk1 {
                slots = slots.with(SlotKey::Sk1, v.as_str());
            }
            if let Some(v) = text {
                slots = slots.with_text(v.as_str());
            }
            let id = t.store.insert("note", "1.0", Payload::new(), Some(slots)).unwrap().id;
            let in_set = matches!(sk1.as_deref(), Some("a") | Some("b"));
            let has_x = text.as_deref().is_some_and(|v| v.to_lowercase().contains('x'));
            if in_set && has_x {
                expected.insert(id);
            }
        }
        let query = Query::new("note")
            .filter("sk1", Term::one_of(["a", "b"]))
            .text("x");

        let by_one = t.collect_pages(&query, 1);
        let by_take = t.collect_pages(&query, take);
        let by_thousand = t.collect_pages(&query, 1000);

        prop_assert_eq!(&by_one, &by_thousand);
        prop_assert_eq!(&by_take, &by_thousand);
        let walked: HashSet<_> = by_one.iter().cloned().collect();
        prop_assert_eq!(walked.len(), by_one.len());
        prop_assert_eq!(walked, expected);
    }
}
