//! LRU cache for previously computed match results.
//!
//! A regexp matcher can pay a linear scan over its compiled patterns on
//! every call. Pipelines see the same span and metric names over and over,
//! so the matcher remembers the boolean outcome per candidate string and
//! answers repeats from the cache. Entries are only ever written after a
//! definitive match computation, which keeps the cache transparent: it can
//! never change an answer, only its cost.

use std::collections::HashMap;

/// Bounded LRU mapping from candidate string to last-computed match result.
///
/// Eviction is strict LRU by recency of access; both reads and writes count
/// as access. A capacity of zero means unbounded. The cache itself is not
/// synchronized; the owning matcher guards it with a single lock so the
/// check-then-write sequence stays atomic under concurrent callers.
#[derive(Debug)]
pub struct MatchResultCache {
    /// Cached results keyed by candidate string.
    entries: HashMap<String, bool>,

    /// Access order for LRU eviction; least recently used first.
    access_order: Vec<String>,

    /// Maximum number of entries; 0 means unbounded.
    capacity: usize,
}

impl MatchResultCache {
    /// Create a cache holding at most `capacity` entries (0 = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: Vec::new(),
            capacity,
        }
    }

    /// Look up the stored result for a candidate, refreshing its recency.
    pub fn get(&mut self, candidate: &str) -> Option<bool> {
        let result = self.entries.get(candidate).copied();
        if result.is_some() {
            self.touch(candidate);
        }
        result
    }

    /// Store a computed result, evicting the least-recently-used entry if
    /// the cache is at capacity. Overwrites count as access.
    pub fn insert(&mut self, candidate: &str, result: bool) {
        if self.entries.insert(candidate.to_string(), result).is_some() {
            self.touch(candidate);
            return;
        }

        if self.capacity > 0 && self.entries.len() > self.capacity {
            // Evict before recording the new key so the fresh entry survives.
            let victim = self.access_order.remove(0);
            self.entries.remove(&victim);
        }

        self.access_order.push(candidate.to_string());
    }

    /// Whether a candidate currently has a cached result, without touching
    /// its recency.
    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains_key(candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured capacity; 0 means unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Move a key to the most-recently-used position.
    fn touch(&mut self, candidate: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == candidate) {
            let key = self.access_order.remove(pos);
            self.access_order.push(key);
        }
    }
}
