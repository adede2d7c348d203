//! Protocol Module
//!
//! Line-oriented text front end for the cache.
//!
//! # Commands
//! - `INIT <capacity>` - Create (or replace) the cache
//! - `PUT <key> <value> [ttlSeconds]` - Store a key-value pair
//! - `GET <key>` - Retrieve a value, `NULL` if absent or expired
//! - `DEL <key>` - Remove a key, `NULL` if absent
//! - `SIZE` - Number of stored entries
//! - `STATS` - Counters and occupancy on one line

mod command;
mod session;

pub use command::Command;
pub use session::{run, Session, NULL, OK};
