//! Slot-addressed storage for id buckets
//!
//! Buckets (tag members, term postings) live in an arena and are addressed by
//! `SlotId`. Back-reference registries store slot ids instead of pointers to
//! the buckets, so a bucket has exactly one owner.
//!
//! Freed slots are recycled with a bumped generation; a stale `SlotId`
//! resolves to nothing.

use crate::document::DocId;

/// Stable handle to a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    /// Position of the slot in the arena
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// Ordered, duplicate-free sequence of ids under a label
#[derive(Debug, Clone)]
pub struct Bucket {
    label: String,
    ids: Vec<DocId>,
}

impl Bucket {
    /// Term or tag value owning this bucket
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Member ids in first-add order
    pub fn ids(&self) -> &[DocId] {
        &self.ids
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if the bucket has no members
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True if `id` is a member
    pub fn contains(&self, id: &DocId) -> bool {
        self.ids.contains(id)
    }
}

/// Result of removing an id from one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    /// The slot is stale or the id was not a member
    Missing,
    /// The id was removed and the bucket still has members
    Removed,
    /// The id was the last member; the slot was freed. Carries the label.
    Emptied(String),
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    bucket: Option<Bucket>,
}

/// Arena of buckets with a visit counter for removal work
#[derive(Debug, Default)]
pub struct BucketArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
    visits: u64,
}

impl BucketArena {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty bucket for `label`
    pub fn allocate(&mut self, label: impl Into<String>) -> SlotId {
        let bucket = Bucket {
            label: label.into(),
            ids: Vec::new(),
        };

        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.bucket = Some(bucket);
            return SlotId {
                index: index as u32,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            bucket: Some(bucket),
        });

        SlotId {
            index: (self.slots.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Resolve a handle
    pub fn get(&self, slot: SlotId) -> Option<&Bucket> {
        self.slots
            .get(slot.index())
            .filter(|s| s.generation == slot.generation)
            .and_then(|s| s.bucket.as_ref())
    }

    fn get_mut(&mut self, slot: SlotId) -> Option<&mut Bucket> {
        self.slots
            .get_mut(slot.index())
            .filter(|s| s.generation == slot.generation)
            .and_then(|s| s.bucket.as_mut())
    }

    /// Append `id` to the bucket. Returns false for a stale handle.
    pub fn push(&mut self, slot: SlotId, id: DocId) -> bool {
        match self.get_mut(slot) {
            Some(bucket) => {
                bucket.ids.push(id);
                true
            }
            None => false,
        }
    }

    /// Remove `id` from one bucket, freeing the slot if it empties
    pub fn splice(&mut self, slot: SlotId, id: &DocId) -> Splice {
        self.visits += 1;

        let Some(bucket) = self.get_mut(slot) else {
            return Splice::Missing;
        };

        let Some(pos) = bucket.ids.iter().position(|member| member == id) else {
            return Splice::Missing;
        };

        bucket.ids.remove(pos);

        if bucket.ids.is_empty() {
            Splice::Emptied(self.release(slot))
        } else {
            Splice::Removed
        }
    }

    /// Remove `id` from every bucket by scanning the whole arena.
    ///
    /// Returns the labels of buckets freed by the removal.
    pub fn scan_remove(&mut self, id: &DocId) -> Vec<String> {
        let live: Vec<SlotId> = self.iter().map(|(slot, _)| slot).collect();

        live.into_iter()
            .filter_map(|slot| match self.splice(slot, id) {
                Splice::Emptied(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    fn release(&mut self, slot: SlotId) -> String {
        let entry = &mut self.slots[slot.index()];
        let label = entry
            .bucket
            .take()
            .map(|bucket| bucket.label)
            .unwrap_or_default();

        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot.index());
        self.live -= 1;

        label
    }

    /// Live buckets in slot order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Bucket)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.bucket.as_ref().map(|bucket| {
                (
                    SlotId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    bucket,
                )
            })
        })
    }

    /// Number of live buckets
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no bucket is live
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Buckets visited by removals so far
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Reset the visit counter
    pub fn reset_visits(&mut self) {
        self.visits = 0;
    }
}
