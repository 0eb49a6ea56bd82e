//! Direct value resolution

use serde_json::Value;

use crate::path::CompiledPath;

/// Resolve a path against a record.
///
/// Descends one segment per depth. Returns `None` as soon as a segment is
/// missing or an intermediate value is not an object.
pub fn resolve<'a>(record: &'a Value, path: &CompiledPath) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    path.segments()
        .iter()
        .try_fold(record, |node, segment| node.get(segment.name()))
}

/// Text form of a scalar leaf.
///
/// Strings are taken as is (empty strings yield nothing), numbers use their
/// JSON rendering. Booleans, null, arrays and objects have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
