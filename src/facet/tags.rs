//! Tag facet manager

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::document::DocId;
use crate::path::CompiledPath;
use crate::projector::{resolve, scalar_text};

use super::arena::{BucketArena, SlotId, Splice};
use super::register::Register;

/// Id buckets keyed by tag value
#[derive(Debug)]
pub struct TagFacets {
    path: CompiledPath,
    fastupdate: bool,
    buckets: BucketArena,
    by_value: HashMap<String, SlotId>,
}

impl TagFacets {
    /// Creates an empty facet set reading tags from `path`
    pub fn new(path: CompiledPath, fastupdate: bool) -> Self {
        Self {
            path,
            fastupdate,
            buckets: BucketArena::new(),
            by_value: HashMap::new(),
        }
    }

    /// Path the tag values are read from
    pub fn path(&self) -> &CompiledPath {
        &self.path
    }

    /// Tag values of `record`.
    ///
    /// A single value is treated as a one-element list. Values without a
    /// text form are skipped.
    pub fn tag_values(&self, record: &Value) -> Vec<String> {
        match resolve(record, &self.path) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(value) => scalar_text(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Insert `id` into the bucket of every tag value of `record`.
    ///
    /// Values repeated within the record count once. With `append`, buckets
    /// already holding the id are left untouched. With fastupdate, every
    /// insertion is linked into `register`. Returns the number of insertions.
    pub fn add_tags(
        &mut self,
        id: &DocId,
        record: &Value,
        register: &mut Register,
        append: bool,
    ) -> usize {
        let mut dupes = HashSet::new();
        let mut inserted = 0;

        for value in self.tag_values(record) {
            if !dupes.insert(value.clone()) {
                continue;
            }

            let slot = match self.by_value.get(&value) {
                Some(slot) => *slot,
                None => {
                    let slot = self.buckets.allocate(value.clone());
                    self.by_value.insert(value, slot);
                    slot
                }
            };

            if append && self.buckets.get(slot).is_some_and(|b| b.contains(id)) {
                continue;
            }

            self.buckets.push(slot, id.clone());
            inserted += 1;

            if self.fastupdate {
                register.link(id, slot);
            }
        }

        inserted
    }

    /// Remove `id` from its buckets.
    ///
    /// With fastupdate only the buckets in `refs` are visited; without it every
    /// bucket is scanned. Emptied buckets are deleted. Returns the number of
    /// buckets the id was removed from.
    pub fn remove_tags(&mut self, id: &DocId, refs: &[SlotId]) -> usize {
        if !self.fastupdate {
            let before = self.total_memberships();
            let emptied = self.buckets.scan_remove(id);
            self.forget(emptied);
            return before - self.total_memberships();
        }

        let mut removed = 0;
        let mut emptied = Vec::new();

        for slot in refs {
            match self.buckets.splice(*slot, id) {
                Splice::Missing => {}
                Splice::Removed => removed += 1,
                Splice::Emptied(label) => {
                    removed += 1;
                    emptied.push(label);
                }
            }
        }

        self.forget(emptied);
        removed
    }

    fn forget(&mut self, labels: Vec<String>) {
        for label in labels {
            self.by_value.remove(&label);
        }
    }

    fn total_memberships(&self) -> usize {
        self.buckets.iter().map(|(_, bucket)| bucket.len()).sum()
    }

    /// Members of the bucket for `tag`, in first-add order
    pub fn bucket(&self, tag: &str) -> Option<&[DocId]> {
        self.by_value
            .get(tag)
            .and_then(|slot| self.buckets.get(*slot))
            .map(|bucket| bucket.ids())
    }

    /// Known tag values, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.by_value.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of live buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True if no bucket is live
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets visited by removals so far
    pub fn removal_visits(&self) -> u64 {
        self.buckets.visits()
    }

    /// Reset the removal visit counter
    pub fn reset_removal_visits(&mut self) {
        self.buckets.reset_visits();
    }
}
