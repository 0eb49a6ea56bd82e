//! Store-extraction walk
//!
//! Mirrors the shape traversed along a path into a fresh JSON structure so
//! that only the configured paths of a record are kept.

use serde_json::{Map, Value};

use crate::path::CompiledPath;

use super::walk::{traverse, Step, Visit};

/// Mirror the part of `record` reached by `path` into `store`.
///
/// - Final depth: the resolved value is copied verbatim
/// - Intermediate array: a parallel array of the same length is created
///   (kept if one of that length already exists), unreached slots stay null
/// - Intermediate object: the nested object is created lazily
pub fn project_into_store(record: &Value, store: &mut Map<String, Value>, path: &CompiledPath) {
    traverse(record, path, |trail, visit| match visit {
        Visit::Leaf { node, .. } => {
            if let Some(slot) = place(store, trail) {
                *slot = node.clone();
            }
        }
        Visit::Array { len } => {
            if let Some(slot) = place(store, trail) {
                let reusable = matches!(slot, Value::Array(existing) if existing.len() == len);
                if !reusable {
                    *slot = Value::Array(vec![Value::Null; len]);
                }
            }
        }
        Visit::Object => {
            if let Some(slot) = place(store, trail) {
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
            }
        }
    });
}

/// Build the stored subset of `record` for every path in `paths`
pub fn project_paths(record: &Value, paths: &[CompiledPath]) -> Value {
    let mut store = Map::new();

    for path in paths {
        project_into_store(record, &mut store, path);
    }

    Value::Object(store)
}

/// Locate the slot addressed by `trail`, creating the final object key.
///
/// Parents are created by earlier visits; a missing parent yields `None`.
fn place<'s>(store: &'s mut Map<String, Value>, trail: &[Step<'_>]) -> Option<&'s mut Value> {
    let (first, rest) = trail.split_first()?;

    let Step::Key(key) = first else {
        return None;
    };

    let mut slot = store.entry(key.to_string()).or_insert(Value::Null);

    for step in rest {
        slot = match step {
            Step::Key(key) => slot
                .as_object_mut()?
                .entry(key.to_string())
                .or_insert(Value::Null),
            Step::Index(i) => slot.as_array_mut()?.get_mut(*i)?,
        };
    }

    Some(slot)
}
