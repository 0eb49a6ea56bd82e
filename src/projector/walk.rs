//! Stack-based traversal and the indexing walk

use serde_json::Value;

use crate::document::DocId;
use crate::field::{FieldIndex, FieldIndexResult};
use crate::path::CompiledPath;

use super::resolve::scalar_text;

/// Maximum number of directly nested array levels followed at one depth.
///
/// Deeper nesting is ignored.
pub const MAX_ARRAY_NESTING: usize = 32;

/// Location of a node relative to the record root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'p> {
    Key(&'p str),
    Index(usize),
}

/// What the traversal met at a location
#[derive(Debug)]
pub(crate) enum Visit<'a> {
    /// Value resolved at the final depth
    Leaf { node: &'a Value, pos: usize },
    /// Intermediate array of the given length
    Array { len: usize },
    /// Intermediate object
    Object,
}

struct Frame<'a, 'p> {
    node: &'a Value,
    pos: usize,
    trail: Vec<Step<'p>>,
    nesting: usize,
}

/// Walk `record` along `path`, reporting every visited location in document
/// order.
pub(crate) fn traverse<'a, 'p, F>(record: &'a Value, path: &'p CompiledPath, mut visit: F)
where
    F: FnMut(&[Step<'p>], Visit<'a>),
{
    let Some(root) = path.root() else {
        return;
    };

    let Some(node) = record.get(root) else {
        return;
    };

    let mut stack = vec![Frame {
        node,
        pos: 0,
        trail: vec![Step::Key(root)],
        nesting: 0,
    }];

    while let Some(frame) = stack.pop() {
        if path.is_last(frame.pos) {
            visit(
                &frame.trail,
                Visit::Leaf {
                    node: frame.node,
                    pos: frame.pos,
                },
            );
            continue;
        }

        match frame.node {
            Value::Array(items) => {
                if frame.nesting >= MAX_ARRAY_NESTING {
                    continue;
                }

                visit(&frame.trail, Visit::Array { len: items.len() });

                // Reverse push keeps element order on pop
                for (i, item) in items.iter().enumerate().rev() {
                    let mut trail = frame.trail.clone();
                    trail.push(Step::Index(i));
                    stack.push(Frame {
                        node: item,
                        pos: frame.pos,
                        trail,
                        nesting: frame.nesting + 1,
                    });
                }
            }
            Value::Object(map) => {
                visit(&frame.trail, Visit::Object);

                let Some(segment) = path.segment(frame.pos + 1) else {
                    continue;
                };

                if let Some(child) = map.get(segment.name()) {
                    let mut trail = frame.trail;
                    trail.push(Step::Key(segment.name()));
                    stack.push(Frame {
                        node: child,
                        pos: frame.pos + 1,
                        trail,
                        nesting: 0,
                    });
                }
            }
            _ => {}
        }
    }
}

/// A unit of content handed to a field index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexUnit {
    /// Text to index
    pub text: String,
    /// Append flag passed to the index
    pub append: bool,
}

/// Collect the units the indexing walk would feed to a field index.
///
/// At the final depth an array is either flattened (one unit per element,
/// append forced to true) or joined with a single space into one unit that
/// keeps the caller's append flag.
pub fn collect_index_units(record: &Value, path: &CompiledPath, append: bool) -> Vec<IndexUnit> {
    let mut units = Vec::new();

    traverse(record, path, |_, visit| {
        let Visit::Leaf { node, pos } = visit else {
            return;
        };

        match node {
            Value::Array(items) if path.flattens_at(pos) => {
                units.extend(items.iter().filter_map(scalar_text).map(|text| IndexUnit {
                    text,
                    append: true,
                }));
            }
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(scalar_text)
                    .collect::<Vec<_>>()
                    .join(" ");

                if !joined.is_empty() {
                    units.push(IndexUnit {
                        text: joined,
                        append,
                    });
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    units.push(IndexUnit { text, append });
                }
            }
        }
    });

    units
}

/// Run the indexing walk, feeding every unit to `index` under `id`.
///
/// Returns the number of units indexed. Index failures propagate.
pub fn project_into_index<I>(
    record: &Value,
    path: &CompiledPath,
    index: &mut I,
    id: &DocId,
    append: bool,
) -> FieldIndexResult<usize>
where
    I: FieldIndex + ?Sized,
{
    let units = collect_index_units(record, path, append);

    for unit in &units {
        index.add(id, &unit.text, unit.append)?;
    }

    Ok(units.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(units: &[IndexUnit]) -> Vec<(&str, bool)> {
        units.iter().map(|u| (u.text.as_str(), u.append)).collect()
    }

    #[test]
    fn test_scalar_leaf() {
        let doc = json!({"title": "Hello World"});
        let units = collect_index_units(&doc, &CompiledPath::compile("title"), false);
        assert_eq!(texts(&units), vec![("Hello World", false)]);
    }

    #[test]
    fn test_array_leaf_joined() {
        let doc = json!({"tags": ["x", "y", "z"]});
        let units = collect_index_units(&doc, &CompiledPath::compile("tags"), false);
        assert_eq!(texts(&units), vec![("x y z", false)]);
    }

    #[test]
    fn test_array_leaf_flattened_forces_append() {
        let doc = json!({"tags": ["x", "y"]});
        let units = collect_index_units(&doc, &CompiledPath::compile("tags[]"), false);
        assert_eq!(texts(&units), vec![("x", true), ("y", true)]);
    }

    #[test]
    fn test_intermediate_array_fans_out() {
        let doc = json!({
            "contents": [
                {"body": "first"},
                {"other": "skip"},
                {"body": "second"}
            ]
        });
        let units = collect_index_units(&doc, &CompiledPath::compile("contents:body"), false);
        assert_eq!(texts(&units), vec![("first", false), ("second", false)]);
    }

    #[test]
    fn test_nested_arrays_keep_document_order() {
        let doc = json!({
            "a": [
                [{"b": "1"}, {"b": "2"}],
                {"b": "3"}
            ]
        });
        let units = collect_index_units(&doc, &CompiledPath::compile("a:b"), true);
        assert_eq!(texts(&units), vec![("1", true), ("2", true), ("3", true)]);
    }

    #[test]
    fn test_absent_and_falsy_intermediates_end_branch() {
        let doc = json!({"meta": null, "list": [null, 0, "", {"x": "ok"}]});
        assert!(collect_index_units(&doc, &CompiledPath::compile("meta:x"), false).is_empty());
        assert!(collect_index_units(&doc, &CompiledPath::compile("missing:x"), false).is_empty());

        let units = collect_index_units(&doc, &CompiledPath::compile("list:x"), false);
        assert_eq!(texts(&units), vec![("ok", false)]);
    }

    #[test]
    fn test_null_leaf_ignored() {
        let doc = json!({"title": null});
        assert!(collect_index_units(&doc, &CompiledPath::compile("title"), false).is_empty());
    }

    #[test]
    fn test_numeric_leaf() {
        let doc = json!({"year": 1999});
        let units = collect_index_units(&doc, &CompiledPath::compile("year"), false);
        assert_eq!(texts(&units), vec![("1999", false)]);
    }

    #[test]
    fn test_excessive_array_nesting_ignored() {
        let mut node = json!({"b": "deep"});
        for _ in 0..(MAX_ARRAY_NESTING + 1) {
            node = json!([node]);
        }
        let doc = json!({ "a": node });
        assert!(collect_index_units(&doc, &CompiledPath::compile("a:b"), false).is_empty());
    }
}
