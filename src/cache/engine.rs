//! Cache Engine
//!
//! Thread-safe handle over [`CacheCore`]. Each public operation holds one
//! mutex guard for its whole body, so every call is linearizable and the
//! index, recency list and counters are never observed mid-update.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::cache::{CacheCore, StatsSnapshot};
use crate::error::{CacheError, Result};

// == Cache ==
/// A fixed-capacity LRU cache with optional per-entry TTL.
///
/// Cloning returns another handle to the same cache.
///
/// # Example
/// ```
/// use lru_ttl_cache::Cache;
/// use std::time::Duration;
///
/// let cache = Cache::new(2).unwrap();
/// cache.put("a", "1", None);
/// cache.put("session", "token", Some(Duration::from_secs(60)));
///
/// assert_eq!(cache.get("a").as_deref(), Some("1"));
/// assert_eq!(cache.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Mutex<CacheCore>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            inner: Arc::new(Mutex::new(CacheCore::new(capacity))),
        })
    }

    // == Get ==
    /// Returns the value for `key`, or None if absent or expired.
    ///
    /// A hit marks the entry most recently used. An expired entry is removed.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut core = self.inner.lock();
        core.get(key, Instant::now())
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// `ttl` of None means the entry never expires. Keys must be non-empty;
    /// an empty key trips a debug assertion and is otherwise stored as is.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>, ttl: Option<Duration>) {
        let (key, value) = (key.into(), value.into());
        debug_assert!(!key.is_empty(), "cache keys must be non-empty");
        let mut core = self.inner.lock();
        core.put(key, value, ttl, Instant::now());
    }

    // == Delete ==
    /// Removes `key`. Returns true if an entry was stored under it.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    /// Reports whether `key` holds a live entry, without marking it used.
    pub fn contains(&self, key: &str) -> bool {
        let core = self.inner.lock();
        core.contains(key, Instant::now())
    }

    // == Size ==
    /// Number of stored entries.
    ///
    /// Entries that have expired but were not looked up since still count.
    pub fn size(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    // == Stats ==
    /// Counters and occupancy captured under a single lock acquisition.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats()
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        self.inner.lock().debug_validate_invariants();
    }
}
