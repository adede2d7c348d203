//! Error types for the cache and its command processor
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the cache engine.
///
/// A missing or expired key is not an error: lookups return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be a positive number of entries
    #[error("invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

// == Command Error Enum ==
/// Errors raised while parsing or executing a protocol command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Command name not recognised
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Wrong number of arguments; carries the expected usage
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A numeric argument could not be parsed
    #[error("Invalid {what}: {value}")]
    InvalidNumber { what: &'static str, value: String },

    /// The input line was not valid UTF-8
    #[error("Invalid input: line is not valid UTF-8")]
    InvalidEncoding,

    /// A data command arrived before INIT
    #[error("Cache not initialized")]
    NotInitialized,

    /// The engine refused the request
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;
