//! Tag facet tests
//!
//! Test Categories:
//! 1. Array flatten marker
//! 2. Bucket maintenance
//! 3. Removal cost with and without back-references

mod common;

use common::ids;
use docindex::document::{DocumentConfig, DocumentStore};
use serde_json::json;

fn tagged(fastupdate: bool) -> DocumentStore {
    let config = DocumentConfig::new(["title"])
        .with_tag("tags[]")
        .with_fastupdate(fastupdate);
    DocumentStore::new(config).unwrap()
}

// =============================================================================
// ARRAY FLATTEN MARKER
// =============================================================================

/// Each array element becomes its own bucket; appending the same record
/// does not duplicate membership.
#[test]
fn test_flattened_tag_array() {
    let mut store = tagged(true);
    let record = json!({"id": 1, "title": "t", "tags": ["x", "y"]});

    store.add_record(&record).unwrap();
    assert_eq!(store.tag_bucket("x").unwrap(), Some(&ids(&[1])[..]));
    assert_eq!(store.tag_bucket("y").unwrap(), Some(&ids(&[1])[..]));

    store.append_record(&record).unwrap();
    assert_eq!(store.tag_bucket("x").unwrap(), Some(&ids(&[1])[..]));
    assert_eq!(store.tag_bucket("y").unwrap(), Some(&ids(&[1])[..]));
}

/// Numeric tag values are bucketed by their text form.
#[test]
fn test_numeric_tags() {
    let mut store = tagged(true);
    store.add(1, &json!({"tags": [2020, "new"]})).unwrap();
    assert_eq!(store.tag_bucket("2020").unwrap(), Some(&ids(&[1])[..]));
}

// =============================================================================
// BUCKET MAINTENANCE
// =============================================================================

/// Buckets keep first-add order and drop ids on removal.
#[test]
fn test_bucket_order_and_cleanup() {
    let mut store = tagged(true);
    for id in [3, 1, 2] {
        store.add(id, &json!({"tags": ["shared"]})).unwrap();
    }
    assert_eq!(store.tag_bucket("shared").unwrap(), Some(&ids(&[3, 1, 2])[..]));

    store.remove(1).unwrap();
    assert_eq!(store.tag_bucket("shared").unwrap(), Some(&ids(&[3, 2])[..]));

    store.remove(3).unwrap();
    store.remove(2).unwrap();
    assert_eq!(store.tag_bucket("shared").unwrap(), None);
    assert!(store.tag_facets().unwrap().is_empty());
}

/// Replacing a document moves it between buckets.
#[test]
fn test_update_moves_between_buckets() {
    let mut store = tagged(false);
    store.add(1, &json!({"tags": ["old"]})).unwrap();
    store.update(1, &json!({"tags": ["new"]})).unwrap();

    assert_eq!(store.tag_bucket("old").unwrap(), None);
    assert_eq!(store.tag_bucket("new").unwrap(), Some(&ids(&[1])[..]));
}

// =============================================================================
// REMOVAL COST
// =============================================================================

fn populate(store: &mut DocumentStore) {
    for id in 0..50i64 {
        let tag = format!("t{}", id);
        store.add(id, &json!({"tags": [tag, "common"]})).unwrap();
    }
    store.add(100, &json!({"tags": ["a", "b", "c"]})).unwrap();
}

/// With back-references, removal visits only the buckets holding the id.
#[test]
fn test_fastupdate_removal_visits_only_member_buckets() {
    let mut store = tagged(true);
    populate(&mut store);

    let before = store.tag_facets().unwrap().removal_visits();
    store.remove(100).unwrap();
    let visited = store.tag_facets().unwrap().removal_visits() - before;

    assert_eq!(visited, 3);
    assert!(!store.contain(100));
}

/// Without back-references, removal scans every bucket.
#[test]
fn test_scan_removal_visits_every_bucket() {
    let mut store = tagged(false);
    populate(&mut store);

    let buckets = store.tag_facets().unwrap().len() as u64;
    let before = store.tag_facets().unwrap().removal_visits();
    store.remove(100).unwrap();
    let visited = store.tag_facets().unwrap().removal_visits() - before;

    assert_eq!(visited, buckets);
    assert_eq!(store.tag_bucket("a").unwrap(), None);
}
