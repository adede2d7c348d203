//! Command Parsing
//!
//! Turns one line of the text protocol into a typed [`Command`].

use std::str::FromStr;
use std::time::Duration;

use crate::error::CommandError;

const INIT_USAGE: &str = "INIT <capacity>";
const PUT_USAGE: &str = "PUT <key> <value> [ttlSeconds]";
const GET_USAGE: &str = "GET <key>";
const DEL_USAGE: &str = "DEL <key>";
const SIZE_USAGE: &str = "SIZE";
const STATS_USAGE: &str = "STATS";

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `INIT <capacity>`
    Init { capacity: usize },
    /// `PUT <key> <value> [ttlSeconds]`
    Put {
        key: String,
        value: String,
        ttl: Option<Duration>,
    },
    /// `GET <key>`
    Get { key: String },
    /// `DEL <key>`
    Del { key: String },
    /// `SIZE`
    Size,
    /// `STATS`
    Stats,
}

impl Command {
    /// Protocol name of the command, as typed by the client.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init { .. } => "INIT",
            Command::Put { .. } => "PUT",
            Command::Get { .. } => "GET",
            Command::Del { .. } => "DEL",
            Command::Size => "SIZE",
            Command::Stats => "STATS",
        }
    }
}

/// Parses a whitespace-separated command line.
///
/// Command names are case-sensitive. Keys and values are single tokens.
impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            return Err(CommandError::UnknownCommand(String::new()));
        };

        match (name, args) {
            ("INIT", [capacity]) => Ok(Command::Init {
                capacity: parse_number("capacity", capacity)?,
            }),
            ("INIT", _) => Err(CommandError::Usage(INIT_USAGE)),

            ("PUT", [key, value]) => Ok(Command::Put {
                key: key.to_string(),
                value: value.to_string(),
                ttl: None,
            }),
            ("PUT", [key, value, ttl]) => Ok(Command::Put {
                key: key.to_string(),
                value: value.to_string(),
                ttl: Some(Duration::from_secs(parse_number("ttl", ttl)?)),
            }),
            ("PUT", _) => Err(CommandError::Usage(PUT_USAGE)),

            ("GET", [key]) => Ok(Command::Get {
                key: key.to_string(),
            }),
            ("GET", _) => Err(CommandError::Usage(GET_USAGE)),

            ("DEL", [key]) => Ok(Command::Del {
                key: key.to_string(),
            }),
            ("DEL", _) => Err(CommandError::Usage(DEL_USAGE)),

            ("SIZE", []) => Ok(Command::Size),
            ("SIZE", _) => Err(CommandError::Usage(SIZE_USAGE)),

            ("STATS", []) => Ok(Command::Stats),
            ("STATS", _) => Err(CommandError::Usage(STATS_USAGE)),

            (other, _) => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_number<T: FromStr>(what: &'static str, raw: &str) -> Result<T, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        what,
        value: raw.to_string(),
    })
}
