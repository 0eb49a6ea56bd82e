//! Shared fixtures for integration tests

#![allow(dead_code)]

use docindex::document::DocId;
use docindex::field::{FieldIndex, FieldIndexResult, FieldQuery};

/// Field index that records every call it receives.
///
/// Search returns ids whose indexed text contains the query verbatim, in
/// first-add order.
#[derive(Debug, Default)]
pub struct RecordingIndex {
    pub entries: Vec<(DocId, String)>,
    pub add_calls: Vec<(DocId, String, bool)>,
    pub forced_removals: usize,
    pub deferred_removals: usize,
}

impl FieldIndex for RecordingIndex {
    fn add(&mut self, id: &DocId, content: &str, append: bool) -> FieldIndexResult<()> {
        self.add_calls.push((id.clone(), content.to_string(), append));
        self.entries.push((id.clone(), content.to_string()));
        Ok(())
    }

    fn remove(&mut self, id: &DocId, force: bool) -> FieldIndexResult<()> {
        if force {
            self.forced_removals += 1;
        } else {
            self.deferred_removals += 1;
        }
        self.entries.retain(|(entry, _)| entry != id);
        Ok(())
    }

    fn search(&self, query: &str, limit: usize, _options: &FieldQuery) -> FieldIndexResult<Vec<DocId>> {
        let mut hits: Vec<DocId> = Vec::new();
        for (id, text) in &self.entries {
            if text.contains(query) && !hits.contains(id) {
                hits.push(id.clone());
            }
        }
        hits.truncate(limit);
        Ok(hits)
    }
}

pub fn ids(values: &[i64]) -> Vec<DocId> {
    values.iter().map(|v| DocId::from(*v)).collect()
}
