//! Stored records, full or projected

use std::collections::HashMap;

use serde_json::Value;

use crate::path::CompiledPath;
use crate::projector::project_paths;

use super::id::DocId;

/// Records kept per id for `get` and enrichment
#[derive(Debug, Default)]
pub struct RecordStore {
    paths: Option<Vec<CompiledPath>>,
    records: HashMap<DocId, Value>,
}

impl RecordStore {
    /// Store that keeps full records
    pub fn full() -> Self {
        Self::default()
    }

    /// Store that keeps only the given paths
    pub fn projected(paths: Vec<CompiledPath>) -> Self {
        Self {
            paths: Some(paths),
            records: HashMap::new(),
        }
    }

    /// The value that would be stored for `record`
    pub fn build(&self, record: &Value) -> Value {
        match &self.paths {
            Some(paths) => project_paths(record, paths),
            None => record.clone(),
        }
    }

    /// Build and keep the stored form of `record` under `id`
    pub fn put(&mut self, id: DocId, record: &Value) {
        let stored = self.build(record);
        self.records.insert(id, stored);
    }

    /// Keep `data` verbatim under `id`
    pub fn set(&mut self, id: DocId, data: Value) {
        self.records.insert(id, data);
    }

    /// Stored value for `id`
    pub fn get(&self, id: &DocId) -> Option<&Value> {
        self.records.get(id)
    }

    /// Drop the stored value for `id`
    pub fn remove(&mut self, id: &DocId) -> Option<Value> {
        self.records.remove(id)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
