//! Operation counters of a document store
//!
//! - Counters only, monotonic
//! - Relaxed atomics so read paths can count through `&self`

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters kept per document store
#[derive(Debug, Default)]
pub struct StoreMetrics {
    adds: AtomicU64,
    appends: AtomicU64,
    updates: AtomicU64,
    removes: AtomicU64,
    searches: AtomicU64,
    and_short_circuits: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl StoreMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a new entry
    pub fn increment_adds(&self) {
        self.adds.fetch_add(1, Ordering::Relaxed);
    }

    /// Count an extension of an existing entry
    pub fn increment_appends(&self) {
        self.appends.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a replacement
    pub fn increment_updates(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a removal
    pub fn increment_removes(&self) {
        self.removes.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a search
    pub fn increment_searches(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Count an AND search voided by an empty field
    pub fn increment_and_short_circuits(&self) {
        self.and_short_circuits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a cache hit
    pub fn increment_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a cache miss
    pub fn increment_cache_misses(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            adds: self.adds.load(Ordering::Relaxed),
            appends: self.appends.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            and_short_circuits: self.and_short_circuits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of the counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub adds: u64,
    pub appends: u64,
    pub updates: u64,
    pub removes: u64,
    pub searches: u64,
    pub and_short_circuits: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}
