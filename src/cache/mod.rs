//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with strict LRU eviction and
//! lazy TTL expiration.

mod engine;
mod entry;
mod lru;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use engine::Cache;
pub use entry::CacheEntry;
pub use lru::{RecencyList, SlotId};
pub use policy::CacheCore;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
