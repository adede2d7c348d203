//! Configuration Module
//!
//! Handles loading process configuration from environment variables.

use std::env;

/// Default tracing filter when neither `RUST_LOG` nor `LOG_FILTER` is set
pub const DEFAULT_LOG_FILTER: &str = "lru_ttl_cache=warn";

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity of a cache created at startup; None waits for `INIT`
    pub capacity: Option<usize>,
    /// Tracing filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Pre-initialise the cache with this capacity (default: unset)
    /// - `LOG_FILTER` - Tracing filter (default: `lru_ttl_cache=warn`)
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            capacity: lookup("CACHE_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .or(defaults.capacity),
            log_filter: lookup("LOG_FILTER")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
