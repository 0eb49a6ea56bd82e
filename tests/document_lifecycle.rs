//! Document lifecycle tests
//!
//! Test Categories:
//! 1. Add/remove round trip
//! 2. Append behavior
//! 3. Update equivalence
//! 4. Stored records
//! 5. Field index contract

mod common;

use common::{ids, RecordingIndex};
use docindex::document::{DocId, DocumentConfig, DocumentStore};
use docindex::query::{Hits, SearchOptions};
use serde_json::{json, Value};

fn corpus() -> Vec<Value> {
    vec![
        json!({"id": 1, "title": "red apple", "body": {"text": "fresh fruit"}, "cat": ["food", "red"]}),
        json!({"id": 2, "title": "green apple", "body": {"text": "sour fruit"}, "cat": "food"}),
        json!({"id": "x-3", "title": "red car", "body": {"text": "fast"}, "cat": ["auto", "red"]}),
        json!({"id": 0, "title": "zero", "body": {"text": "nothing"}}),
    ]
}

fn full_config() -> DocumentConfig {
    DocumentConfig::new(["title", "body:text"])
        .with_tag("cat")
        .with_full_store()
}

fn queries() -> Vec<(&'static str, SearchOptions)> {
    vec![
        ("apple", SearchOptions::new()),
        ("red", SearchOptions::new()),
        ("fruit", SearchOptions::new().with_field("body:text")),
        ("", SearchOptions::new().with_tags(["food", "red", "auto"])),
        ("apple", SearchOptions::new().with_tag("red")),
    ]
}

fn snapshot(store: &DocumentStore) -> Vec<Value> {
    queries()
        .into_iter()
        .map(|(query, options)| serde_json::to_value(store.search(query, &options).unwrap()).unwrap())
        .collect()
}

// =============================================================================
// ROUND TRIP
// =============================================================================

/// Adding then removing a fresh id leaves no trace in any structure.
#[test]
fn test_add_remove_round_trip() {
    let mut store = DocumentStore::new(full_config()).unwrap();
    for record in corpus() {
        store.add_record(&record).unwrap();
    }
    let before = snapshot(&store);

    let extra = json!({"id": 9, "title": "red apple pie", "body": {"text": "fruit"}, "cat": ["food", "new"]});
    store.add_record(&extra).unwrap();
    assert!(store.contain(9));
    assert_ne!(snapshot(&store), before);

    assert!(store.remove(9).unwrap());
    assert!(!store.contain(9));
    assert_eq!(snapshot(&store), before);
    assert_eq!(store.tag_bucket("new").unwrap(), None);
    assert_eq!(store.get(9).unwrap(), None);
}

/// Round trip holds with fastupdate disabled as well.
#[test]
fn test_round_trip_without_fastupdate() {
    let mut store = DocumentStore::new(full_config().with_fastupdate(false)).unwrap();
    for record in corpus() {
        store.add_record(&record).unwrap();
    }
    let before = snapshot(&store);

    store
        .add(10, &json!({"title": "red", "body": {"text": "x"}, "cat": "red"}))
        .unwrap();
    store.remove(10).unwrap();

    assert_eq!(snapshot(&store), before);
}

/// Removing an id that was never added is a no-op.
#[test]
fn test_remove_unknown_is_noop() {
    let mut store = DocumentStore::new(full_config()).unwrap();
    store.add_record(&corpus()[0]).unwrap();

    assert!(!store.remove(404).unwrap());
    assert!(store.contain(1));
}

/// Both integer zero and string ids are valid keys.
#[test]
fn test_zero_and_string_ids() {
    let mut store = DocumentStore::new(full_config()).unwrap();
    for record in corpus() {
        store.add_record(&record).unwrap();
    }

    assert!(store.contain(0));
    assert!(store.contain("x-3"));
    assert_eq!(store.len(), 4);
}

// =============================================================================
// APPEND
// =============================================================================

/// Appending the same tags twice never duplicates bucket members.
#[test]
fn test_append_is_idempotent_on_tags() {
    let mut store = DocumentStore::new(full_config()).unwrap();
    let record = json!({"id": 1, "title": "t", "cat": ["a", "a", "b"]});

    store.add_record(&record).unwrap();
    store.append_record(&record).unwrap();
    store.append_record(&record).unwrap();

    assert_eq!(store.tag_bucket("a").unwrap(), Some(&ids(&[1])[..]));
    assert_eq!(store.tag_bucket("b").unwrap(), Some(&ids(&[1])[..]));
}

/// Append keeps earlier terms and adds new ones.
#[test]
fn test_append_extends_fields_and_tags() {
    let mut store = DocumentStore::new(full_config()).unwrap();
    store.add(1, &json!({"title": "alpha", "cat": "one"})).unwrap();
    store.append(1, &json!({"title": "beta", "cat": "two"})).unwrap();

    let options = SearchOptions::new().with_pluck("title");
    assert_eq!(store.search("alpha", &options).unwrap().hit_count(), 1);
    assert_eq!(store.search("beta", &options).unwrap().hit_count(), 1);
    assert_eq!(store.tag_bucket("one").unwrap(), Some(&ids(&[1])[..]));
    assert_eq!(store.tag_bucket("two").unwrap(), Some(&ids(&[1])[..]));

    // A single remove clears everything appended.
    store.remove(1).unwrap();
    assert!(store.search("alpha", &options).unwrap().is_empty());
    assert_eq!(store.tag_bucket("two").unwrap(), None);
}

// =============================================================================
// UPDATE
// =============================================================================

/// `update` leaves the same state as `remove` followed by `add`.
#[test]
fn test_update_equals_remove_then_add() {
    let d1 = json!({"title": "red apple", "body": {"text": "fresh"}, "cat": ["food", "red"]});
    let d2 = json!({"title": "blue car", "body": {"text": "fast fruit"}, "cat": ["auto"]});

    let mut updated = DocumentStore::new(full_config()).unwrap();
    let mut replaced = DocumentStore::new(full_config()).unwrap();
    for store in [&mut updated, &mut replaced] {
        for record in corpus() {
            store.add_record(&record).unwrap();
        }
        store.add(7, &d1).unwrap();
    }

    updated.update(7, &d2).unwrap();
    replaced.remove(7).unwrap();
    replaced.add(7, &d2).unwrap();

    assert_eq!(snapshot(&updated), snapshot(&replaced));
    assert_eq!(updated.get(7).unwrap(), replaced.get(7).unwrap());
    for tag in ["food", "red", "auto"] {
        assert_eq!(updated.tag_bucket(tag).unwrap(), replaced.tag_bucket(tag).unwrap());
    }
}

// =============================================================================
// STORED RECORDS
// =============================================================================

/// Projected storage keeps only the declared paths.
#[test]
fn test_store_projection() {
    let config = DocumentConfig::new(["title"]).with_store_paths(["title"]);
    let mut store = DocumentStore::new(config).unwrap();
    store.add_record(&json!({"id": 1, "title": "t", "body": "b"})).unwrap();

    assert_eq!(store.get(1).unwrap(), Some(&json!({"title": "t"})));
}

/// Nested store paths mirror the record's shape through arrays.
#[test]
fn test_nested_store_projection() {
    let config = DocumentConfig::new(["title"]).with_store_paths(["meta:author", "items:name"]);
    let mut store = DocumentStore::new(config).unwrap();
    store
        .add_record(&json!({
            "id": 1,
            "title": "t",
            "meta": {"author": "ann", "year": 2020},
            "items": [{"name": "a", "qty": 1}, {"name": "b", "qty": 2}]
        }))
        .unwrap();

    assert_eq!(
        store.get(1).unwrap(),
        Some(&json!({"meta": {"author": "ann"}, "items": [{"name": "a"}, {"name": "b"}]}))
    );
}

/// Enriched hits carry the stored record.
#[test]
fn test_enrich_uses_stored_records() {
    let config = DocumentConfig::new(["title"]).with_store_paths(["title"]);
    let mut store = DocumentStore::new(config).unwrap();
    store.add_record(&json!({"id": 1, "title": "apple", "body": "b"})).unwrap();

    let options = SearchOptions::new().with_field("title").with_enrich();
    let response = store.search("apple", &options).unwrap();

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!([{"field": "title", "result": [{"key": 1, "doc": {"title": "apple"}}]}])
    );
}

// =============================================================================
// FIELD INDEX CONTRACT
// =============================================================================

/// Intermediate arrays fan out into one unit per element, a flattened last
/// segment forces append, and an unmarked scalar array is joined.
#[test]
fn test_index_units_reach_field_index() {
    let config = DocumentConfig::new(["items:name", "keywords", "labels[]"]);
    let mut store = DocumentStore::with_indexes(config, |_, _| RecordingIndex::default()).unwrap();

    store
        .add(
            1,
            &json!({
                "items": [{"name": "a"}, {"name": "b"}],
                "keywords": ["x", "y"],
                "labels": ["p", "q"]
            }),
        )
        .unwrap();

    let items = store.field_index("items:name").unwrap();
    assert_eq!(
        items.add_calls,
        vec![
            (DocId::from(1), "a".to_string(), false),
            (DocId::from(1), "b".to_string(), false),
        ]
    );

    let keywords = store.field_index("keywords").unwrap();
    assert_eq!(keywords.add_calls, vec![(DocId::from(1), "x y".to_string(), false)]);

    let labels = store.field_index("labels[]").unwrap();
    assert_eq!(
        labels.add_calls,
        vec![
            (DocId::from(1), "p".to_string(), true),
            (DocId::from(1), "q".to_string(), true),
        ]
    );
}

/// Removal always asks field indexes for immediate removal.
#[test]
fn test_removal_is_forced() {
    let mut store = DocumentStore::with_indexes(DocumentConfig::new(["a", "b"]), |_, _| {
        RecordingIndex::default()
    })
    .unwrap();

    store.add(1, &json!({"a": "x", "b": "y"})).unwrap();
    store.remove(1).unwrap();

    for field in ["a", "b"] {
        let index = store.field_index(field).unwrap();
        assert_eq!(index.forced_removals, 1);
        assert_eq!(index.deferred_removals, 0);
    }
}

/// Search results flow through from a custom index.
#[test]
fn test_custom_index_search() {
    let mut store = DocumentStore::with_indexes(DocumentConfig::new(["title"]), |_, _| {
        RecordingIndex::default()
    })
    .unwrap();
    store.add(2, &json!({"title": "needle"})).unwrap();
    store.add(1, &json!({"title": "needles"})).unwrap();

    let response = store
        .search("needle", &SearchOptions::new().with_pluck("title"))
        .unwrap();
    assert_eq!(response.plucked(), Some(&Hits::Ids(ids(&[2, 1]))));
}
