//! Built-in inverted index
//!
//! Term postings live in a `BucketArena`. With fastupdate each id keeps the
//! slots of the postings it was inserted into, so removal touches only those.
//! Non-forced removal hides the id at once and purges it later.

use std::collections::{HashMap, HashSet};

use crate::document::DocId;
use crate::facet::{BucketArena, SlotId, Splice};

use super::contract::{FieldIndex, FieldQuery};
use super::errors::FieldIndexResult;
use super::intersect::intersect;
use super::tokenizer::{IndexOptions, Tokenizer};

/// Token-based single-field index
#[derive(Debug)]
pub struct TokenIndex {
    tokenizer: Tokenizer,
    fastupdate: bool,
    postings: BucketArena,
    terms: HashMap<String, SlotId>,
    members: HashSet<DocId>,
    backrefs: HashMap<DocId, Vec<SlotId>>,
    pending: HashSet<DocId>,
}

impl TokenIndex {
    /// Creates an empty index
    pub fn new(options: IndexOptions, fastupdate: bool) -> Self {
        Self {
            tokenizer: Tokenizer::new(options),
            fastupdate,
            postings: BucketArena::new(),
            terms: HashMap::new(),
            members: HashSet::new(),
            backrefs: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    /// True if `id` is searchable
    pub fn contains(&self, id: &DocId) -> bool {
        self.members.contains(id)
    }

    /// Number of searchable ids
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if no id is searchable
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Ids awaiting a deferred purge
    pub fn pending_removals(&self) -> usize {
        self.pending.len()
    }

    /// Postings visited by purges so far
    pub fn removal_visits(&self) -> u64 {
        self.postings.visits()
    }

    /// Purge every deferred removal
    pub fn flush(&mut self) {
        let pending: Vec<DocId> = self.pending.drain().collect();
        for id in pending {
            self.purge(&id);
        }
    }

    fn purge(&mut self, id: &DocId) {
        let emptied: Vec<String> = match self.backrefs.remove(id) {
            Some(slots) if self.fastupdate => slots
                .into_iter()
                .filter_map(|slot| match self.postings.splice(slot, id) {
                    Splice::Emptied(label) => Some(label),
                    _ => None,
                })
                .collect(),
            _ => self.postings.scan_remove(id),
        };

        for term in emptied {
            self.terms.remove(&term);
        }

        self.members.remove(id);
        self.pending.remove(id);
    }

    fn matches_suggest(&self, words: &[String], limit: usize) -> Vec<DocId> {
        let mut order: Vec<DocId> = Vec::new();
        let mut hits: HashMap<DocId, usize> = HashMap::new();

        for word in words {
            let Some(bucket) = self.terms.get(word).and_then(|s| self.postings.get(*s)) else {
                continue;
            };

            for id in bucket.ids() {
                if self.pending.contains(id) {
                    continue;
                }
                let count = hits.entry(id.clone()).or_insert(0);
                if *count == 0 {
                    order.push(id.clone());
                }
                *count += 1;
            }
        }

        // Stable sort keeps first-seen order among equal hit counts
        order.sort_by(|a, b| hits[b].cmp(&hits[a]));
        order.truncate(limit);
        order
    }
}

impl FieldIndex for TokenIndex {
    fn add(&mut self, id: &DocId, content: &str, append: bool) -> FieldIndexResult<()> {
        if self.pending.contains(id) {
            self.purge(id);
        }

        let known = append || self.members.contains(id);
        let terms = self.tokenizer.terms(content);

        if terms.is_empty() {
            return Ok(());
        }

        for term in terms {
            let slot = match self.terms.get(&term) {
                Some(slot) => *slot,
                None => {
                    let slot = self.postings.allocate(term.clone());
                    self.terms.insert(term, slot);
                    slot
                }
            };

            if known && self.postings.get(slot).is_some_and(|b| b.contains(id)) {
                continue;
            }

            self.postings.push(slot, id.clone());

            if self.fastupdate {
                self.backrefs.entry(id.clone()).or_default().push(slot);
            }
        }

        self.members.insert(id.clone());
        Ok(())
    }

    fn remove(&mut self, id: &DocId, force: bool) -> FieldIndexResult<()> {
        if !self.members.contains(id) && !self.pending.contains(id) {
            return Ok(());
        }

        if force {
            self.purge(id);
        } else {
            self.members.remove(id);
            self.pending.insert(id.clone());
        }

        Ok(())
    }

    fn search(&self, query: &str, limit: usize, options: &FieldQuery) -> FieldIndexResult<Vec<DocId>> {
        let limit = options.limit.unwrap_or(limit);
        let words = self.tokenizer.words(query);

        if words.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        if options.suggest {
            return Ok(self.matches_suggest(&words, limit));
        }

        let mut lists: Vec<&[DocId]> = Vec::with_capacity(words.len());
        for word in &words {
            match self.terms.get(word).and_then(|s| self.postings.get(*s)) {
                Some(bucket) => lists.push(bucket.ids()),
                None => return Ok(Vec::new()),
            }
        }

        let mut result = intersect(&lists, usize::MAX);
        result.retain(|id| !self.pending.contains(id));
        result.truncate(limit);
        Ok(result)
    }
}
