//! LRU TTL Cache - A fixed-capacity in-memory cache
//!
//! Provides strict LRU eviction, lazy per-entry TTL expiration, thread-safe
//! access and runtime statistics, plus a line-oriented command front end.

pub mod cache;
pub mod config;
pub mod error;
pub mod protocol;

pub use cache::{Cache, StatsSnapshot};
pub use config::Config;
pub use error::{CacheError, CommandError};
pub use protocol::{Command, Session};
