//! Per-id back-reference register

use std::collections::HashMap;

use crate::document::DocId;

use super::arena::SlotId;

/// Maps every present id to the tag buckets that currently contain it.
///
/// An id is present iff it has an entry. References are only recorded when
/// fastupdate is enabled; the entry itself always exists for a present id.
#[derive(Debug, Default)]
pub struct Register {
    entries: HashMap<DocId, Vec<SlotId>>,
}

impl Register {
    /// Creates an empty register
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the entry for `id` if missing
    pub fn ensure(&mut self, id: &DocId) {
        if !self.entries.contains_key(id) {
            self.entries.insert(id.clone(), Vec::new());
        }
    }

    /// Record that `id` was inserted into the bucket at `slot`
    pub fn link(&mut self, id: &DocId, slot: SlotId) {
        self.entries.entry(id.clone()).or_default().push(slot);
    }

    /// True if `id` has an entry
    pub fn contains(&self, id: &DocId) -> bool {
        self.entries.contains_key(id)
    }

    /// Bucket references recorded for `id`
    pub fn refs(&self, id: &DocId) -> Option<&[SlotId]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Remove the entry for `id`, returning its references
    pub fn take(&mut self, id: &DocId) -> Option<Vec<SlotId>> {
        self.entries.remove(id)
    }

    /// Number of present ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no id is present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Present ids, unordered
    pub fn ids(&self) -> impl Iterator<Item = &DocId> {
        self.entries.keys()
    }
}
