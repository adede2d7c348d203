//! Eviction and Expiration Policy
//!
//! Unsynchronized cache state: decides, per lookup and insert, whether lazy
//! expiration or capacity eviction fires. [`Cache`](super::Cache) wraps this
//! in a mutex; everything here assumes the lock is already held.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, CacheStore, StatsSnapshot};

// == Cache Core ==
/// Store, statistics and capacity for one cache instance.
#[derive(Debug)]
pub struct CacheCore {
    store: CacheStore,
    stats: CacheStats,
    capacity: usize,
}

impl CacheCore {
    // == Constructor ==
    /// Creates an empty core. `capacity` is validated by the caller.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            store: CacheStore::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Get ==
    /// Looks up `key` at `now`.
    ///
    /// Expiration is checked before any recency update, so a stale entry is
    /// removed without ever being promoted.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<String> {
        let Some(id) = self.store.lookup(key) else {
            self.stats.record_miss();
            trace!(key, "cache miss");
            return None;
        };

        let expired = self
            .store
            .entry(id)
            .map_or(true, |entry| entry.is_expired_at(now));
        if expired {
            self.store.remove(key);
            self.stats.record_expiration();
            debug!(key, "expired entry removed on lookup");
            return None;
        }

        self.store.move_to_front(id);
        self.stats.record_hit();
        trace!(key, "cache hit");
        self.store.entry(id).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Inserts or overwrites `key` at `now`.
    ///
    /// Overwrites update the entry in place and never evict. A new key at
    /// full capacity evicts the least recently used entry first, whether or
    /// not that entry has expired.
    pub fn put(&mut self, key: String, value: String, ttl: Option<Duration>, now: Instant) {
        if let Some(id) = self.store.lookup(&key) {
            if let Some(entry) = self.store.entry_mut(id) {
                entry.update(value, ttl, now);
            }
            self.store.move_to_front(id);
            return;
        }

        if self.store.len() >= self.capacity {
            let evicted = self.store.evict_back();
            self.stats.record_eviction();
            debug!(key = %evicted.key, "evicted least recently used entry");
        }

        self.store.insert_front(CacheEntry::new(key, value, ttl, now));
    }

    // == Delete ==
    /// Removes `key` regardless of expiration. Counters are left untouched.
    pub fn delete(&mut self, key: &str) -> bool {
        self.store.remove(key).is_some()
    }

    // == Contains ==
    /// Reports whether `key` holds a live entry at `now`, without touching
    /// recency order or counters.
    pub fn contains(&self, key: &str, now: Instant) -> bool {
        self.store
            .lookup(key)
            .and_then(|id| self.store.entry(id))
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Accessors ==
    /// Returns stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.store.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Stats ==
    /// Snapshot of the counters with the current size and capacity.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.store.len(), self.capacity)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.store.debug_validate_invariants();
        assert!(self.store.len() <= self.capacity, "capacity exceeded");
    }
}
