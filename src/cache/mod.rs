//! Bounded least-recently-used cache of search responses
//!
//! Keys are the query text joined with the serialized search options. The
//! owning store clears the cache on every mutation, so entries never outlive
//! the state they were computed from.

use std::num::NonZeroUsize;

use lru::LruCache;

/// LRU cache keyed by string
#[derive(Debug)]
pub struct SearchCache<V> {
    entries: LruCache<String, V>,
}

impl<V: Clone> SearchCache<V> {
    /// Creates an empty cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Cache key for a query and its serialized options
    pub fn key(query: &str, options: &str) -> String {
        format!("{}\u{1f}{}", query, options)
    }

    /// Look up `key`, marking it most recently used
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.entries.get(key).cloned()
    }

    /// Insert `value`, evicting the least recently used entry when full
    pub fn put(&mut self, key: String, value: V) {
        self.entries.put(key, value);
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}
