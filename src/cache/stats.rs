//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and
//! lazy expirations.

use std::fmt;

use serde::Serialize;

// == Cache Stats ==
/// Running counters, mutated under the cache lock alongside the operation
/// they describe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted due to capacity pressure
    pub evictions: u64,
    /// Number of entries found expired by a lookup
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expiration ==
    /// Counts an expiration discovered by a lookup. The lookup itself is a miss.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
        self.misses += 1;
    }

    // == Snapshot ==
    /// Freezes the counters together with occupancy figures.
    pub fn snapshot(&self, size: usize, capacity: usize) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            expirations: self.expirations,
            hit_rate: self.hit_rate(),
            size,
            capacity,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the cache, taken under a single lock acquisition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Fraction of lookups that hit, in `0.0..=1.0`
    pub hit_rate: f64,
    /// Stored entries, including expired ones not yet probed
    pub size: usize,
    pub capacity: usize,
}

impl StatsSnapshot {
    /// Hit rate as a percentage in `0.0..=100.0`.
    pub fn hit_rate_percent(&self) -> f64 {
        self.hit_rate * 100.0
    }
}

/// Renders the `STATS` protocol line.
impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} hit_rate:{:.2} evictions:{} expirations:{} size:{} capacity:{}",
            self.hits,
            self.misses,
            self.hit_rate_percent(),
            self.evictions,
            self.expirations,
            self.size,
            self.capacity
        )
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_expiration_counts_miss() {
        let mut stats = CacheStats::new();
        stats.record_expiration();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_record_eviction() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_eviction();
        assert_eq!(stats.evictions, 2);
    }

    #[test]
    fn test_display_no_requests() {
        let snapshot = CacheStats::new().snapshot(0, 10);
        assert_eq!(
            snapshot.to_string(),
            "hits:0 misses:0 hit_rate:0.00 evictions:0 expirations:0 size:0 capacity:10"
        );
    }

    #[test]
    fn test_display_rounds_to_two_decimals() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();

        assert_eq!(
            stats.snapshot(2, 2).to_string(),
            "hits:2 misses:1 hit_rate:66.67 evictions:1 expirations:0 size:2 capacity:2"
        );
    }

    #[test]
    fn test_display_full_hit_rate() {
        let mut stats = CacheStats::new();
        stats.record_hit();

        assert!(stats
            .snapshot(1, 1)
            .to_string()
            .contains("hit_rate:100.00"));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_expiration();

        let json = serde_json::to_value(stats.snapshot(3, 5)).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["misses"], 1);
        assert_eq!(json["expirations"], 1);
        assert_eq!(json["hit_rate"], 0.5);
        assert_eq!(json["size"], 3);
        assert_eq!(json["capacity"], 5);
    }
}
