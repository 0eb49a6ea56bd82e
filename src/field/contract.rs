//! Field index contract
//!
//! The document layer drives one index per declared field through this
//! trait and knows nothing else about it.

use serde::{Deserialize, Serialize};

use crate::document::DocId;

use super::errors::FieldIndexResult;

/// Per-field search options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldQuery {
    /// Overrides the query-wide limit for this field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Return partial matches ranked by matched terms instead of requiring
    /// every term
    #[serde(default)]
    pub suggest: bool,
}

/// A single-field inverted index
pub trait FieldIndex {
    /// Insert or extend the entry for `id` with `content`.
    ///
    /// Must not duplicate postings when called again with `append = true`.
    fn add(&mut self, id: &DocId, content: &str, append: bool) -> FieldIndexResult<()>;

    /// Remove `id`. With `force` the removal is immediate, otherwise it may
    /// be deferred.
    fn remove(&mut self, id: &DocId, force: bool) -> FieldIndexResult<()>;

    /// Ordered ids matching `query`, at most `limit` of them
    fn search(&self, query: &str, limit: usize, options: &FieldQuery) -> FieldIndexResult<Vec<DocId>>;
}

impl<T: FieldIndex + ?Sized> FieldIndex for Box<T> {
    fn add(&mut self, id: &DocId, content: &str, append: bool) -> FieldIndexResult<()> {
        (**self).add(id, content, append)
    }

    fn remove(&mut self, id: &DocId, force: bool) -> FieldIndexResult<()> {
        (**self).remove(id, force)
    }

    fn search(&self, query: &str, limit: usize, options: &FieldQuery) -> FieldIndexResult<Vec<DocId>> {
        (**self).search(query, limit, options)
    }
}
