//! Cache Entry Module
//!
//! Defines the payload of a single cache slot with optional expiration.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A key-value pair with an optional absolute expiration instant.
///
/// The recency links live on the arena node holding the entry, see
/// [`RecencyList`](super::RecencyList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The key, kept here so eviction can drop the index entry without a reverse lookup
    pub key: String,
    /// The stored value
    pub value: String,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry whose TTL, if any, starts at `now`.
    pub fn new(key: String, value: String, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: deadline(ttl, now),
        }
    }

    // == Update ==
    /// Overwrites value and expiration in place, keeping the key.
    pub fn update(&mut self, value: String, ttl: Option<Duration>, now: Instant) {
        self.value = value;
        self.expires_at = deadline(ttl, now);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its deadline, so a zero TTL is
    /// already expired on the next probe.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

/// Converts a relative TTL into an absolute deadline.
///
/// A TTL too large to represent is treated as "never expires".
fn deadline(ttl: Option<Duration>, now: Instant) -> Option<Instant> {
    ttl.and_then(|ttl| now.checked_add(ttl))
}
