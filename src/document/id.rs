//! Document identifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of a record, unique per document store.
///
/// Serialized untagged: a JSON integer or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocId {
    /// Integer key
    Int(i64),
    /// String key
    Str(String),
}

impl DocId {
    /// Derive an id from a JSON value.
    ///
    /// Integers (including zero) and non-empty strings are ids. Everything
    /// else, including floats and the empty string, is not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(DocId::Int),
            Value::String(s) if !s.is_empty() => Some(DocId::Str(s.clone())),
            _ => None,
        }
    }

    /// Returns false for ids that can never be stored (the empty string)
    pub fn is_valid(&self) -> bool {
        match self {
            DocId::Int(_) => true,
            DocId::Str(s) => !s.is_empty(),
        }
    }

    /// JSON form of the id
    pub fn to_value(&self) -> Value {
        match self {
            DocId::Int(n) => Value::from(*n),
            DocId::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Int(n) => write!(f, "{}", n),
            DocId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for DocId {
    fn from(value: i64) -> Self {
        DocId::Int(value)
    }
}

impl From<i32> for DocId {
    fn from(value: i32) -> Self {
        DocId::Int(value as i64)
    }
}

impl From<&str> for DocId {
    fn from(value: &str) -> Self {
        DocId::Str(value.to_string())
    }
}

impl From<String> for DocId {
    fn from(value: String) -> Self {
        DocId::Str(value)
    }
}

impl From<&DocId> for DocId {
    fn from(value: &DocId) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        assert_eq!(DocId::from_value(&json!(7)), Some(DocId::Int(7)));
        assert_eq!(DocId::from_value(&json!(0)), Some(DocId::Int(0)));
        assert_eq!(DocId::from_value(&json!("a")), Some(DocId::Str("a".into())));
    }

    #[test]
    fn test_falsy_values_are_not_ids() {
        assert_eq!(DocId::from_value(&json!("")), None);
        assert_eq!(DocId::from_value(&json!(null)), None);
        assert_eq!(DocId::from_value(&json!(false)), None);
        assert_eq!(DocId::from_value(&json!(1.5)), None);
        assert_eq!(DocId::from_value(&json!([1])), None);
    }

    #[test]
    fn test_validity() {
        assert!(DocId::from(0).is_valid());
        assert!(!DocId::from("").is_valid());
    }

    #[test]
    fn test_untagged_serde() {
        assert_eq!(serde_json::to_value(DocId::from(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(DocId::from("x")).unwrap(), json!("x"));

        let id: DocId = serde_json::from_value(json!("doc-1")).unwrap();
        assert_eq!(id, DocId::from("doc-1"));
        assert_eq!(id.to_value(), json!("doc-1"));
    }
}
