//! Command Session
//!
//! Holds the cache for one stdin/stdout conversation and renders each
//! command's reply line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::CommandError;
use crate::protocol::Command;

/// Reply for a successful mutation
pub const OK: &str = "OK";
/// Reply for a missing key
pub const NULL: &str = "NULL";

// == Session ==
/// Executes protocol commands against an optional cache.
///
/// The cache only exists after `INIT` (or when pre-sized via [`Config`]);
/// a later `INIT` replaces it with a fresh one.
#[derive(Debug, Default)]
pub struct Session {
    cache: Option<Cache>,
}

impl Session {
    /// Creates a session with no cache; the first command should be `INIT`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session around an existing cache.
    pub fn with_cache(cache: Cache) -> Self {
        Self { cache: Some(cache) }
    }

    /// Creates a session, pre-initialising the cache when the config names a capacity.
    pub fn from_config(config: &Config) -> Self {
        match config.capacity.map(Cache::new) {
            Some(Ok(cache)) => {
                info!(capacity = cache.capacity(), "cache pre-initialised from config");
                Self::with_cache(cache)
            }
            Some(Err(err)) => {
                warn!(%err, "ignoring configured capacity");
                Self::new()
            }
            None => Self::new(),
        }
    }

    /// Returns the active cache, if initialised.
    pub fn cache(&self) -> Option<&Cache> {
        self.cache.as_ref()
    }

    // == Execute ==
    /// Runs one command and returns its reply line.
    pub fn execute(&mut self, command: Command) -> Result<String, CommandError> {
        let reply = match command {
            Command::Init { capacity } => {
                let cache = Cache::new(capacity)?;
                info!(capacity, "cache initialised");
                self.cache = Some(cache);
                OK.to_string()
            }
            Command::Put { key, value, ttl } => {
                self.active()?.put(key, value, ttl);
                OK.to_string()
            }
            Command::Get { key } => self
                .active()?
                .get(&key)
                .unwrap_or_else(|| NULL.to_string()),
            Command::Del { key } => {
                let removed = self.active()?.delete(&key);
                let reply = if removed { OK } else { NULL };
                reply.to_string()
            }
            Command::Size => self.active()?.size().to_string(),
            Command::Stats => self.active()?.stats().to_string(),
        };
        Ok(reply)
    }

    fn active(&self) -> Result<&Cache, CommandError> {
        self.cache.as_ref().ok_or(CommandError::NotInitialized)
    }

    // == Handle Line ==
    /// Parses and executes one input line.
    ///
    /// Returns None for blank lines. Failures are rendered as `ERROR: <message>`
    /// and leave the session usable.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let reply = line
            .parse::<Command>()
            .and_then(|command| {
                debug!(command = command.name(), "executing command");
                self.execute(command)
            })
            .unwrap_or_else(|err| {
                warn!(%err, line, "command rejected");
                format!("ERROR: {}", err)
            });
        Some(reply)
    }

    /// Decodes one raw input line and handles it like [`Session::handle_line`].
    ///
    /// Bytes that are not valid UTF-8 produce an `ERROR:` reply.
    pub fn handle_bytes(&mut self, line: &[u8]) -> Option<String> {
        match std::str::from_utf8(line) {
            Ok(line) => self.handle_line(line),
            Err(utf8) => {
                let err = CommandError::InvalidEncoding;
                warn!(%err, valid_up_to = utf8.valid_up_to(), "command rejected");
                Some(format!("ERROR: {}", err))
            }
        }
    }
}

// == Run ==
/// Reads commands line by line until EOF, writing one reply per command.
///
/// A line that is not valid UTF-8 gets an `ERROR:` reply; only I/O failures
/// end the loop.
///
/// Replies are flushed after every line so an interactive client sees them
/// immediately.
pub async fn run<R, W>(mut reader: R, mut writer: W, session: &mut Session) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        if let Some(reply) = session.handle_bytes(&line) {
            writer.write_all(format!("{}\n", reply).as_bytes()).await?;
            writer.flush().await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    fn replies(session: &mut Session, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .filter_map(|line| session.handle_line(line))
            .collect()
    }

    #[test]
    fn test_commands_before_init_are_rejected() {
        let mut session = Session::new();

        assert_eq!(
            replies(&mut session, &["GET a", "SIZE"]),
            vec![
                "ERROR: Cache not initialized",
                "ERROR: Cache not initialized"
            ]
        );
        assert!(session.cache().is_none());
    }

    #[test]
    fn test_basic_session() {
        let mut session = Session::new();

        assert_eq!(
            replies(
                &mut session,
                &["INIT 10", "PUT name Alice", "GET name", "GET age", "SIZE"]
            ),
            vec!["OK", "OK", "Alice", "NULL", "1"]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut session = Session::new();

        assert_eq!(session.handle_line("   "), None);
        assert_eq!(session.handle_line(""), None);
    }

    #[test]
    fn test_init_zero_capacity_is_an_error() {
        let mut session = Session::new();

        assert_eq!(
            session.handle_line("INIT 0").as_deref(),
            Some("ERROR: invalid capacity: 0 (must be at least 1)")
        );
        assert!(session.cache().is_none());
    }

    #[test]
    fn test_reinit_replaces_cache() {
        let mut session = Session::new();

        assert_eq!(
            replies(&mut session, &["INIT 2", "PUT a 1", "INIT 3", "SIZE", "GET a"]),
            vec!["OK", "OK", "OK", "0", "NULL"]
        );
        assert_eq!(session.cache().map(Cache::capacity), Some(3));
    }

    #[test]
    fn test_del_command() {
        let mut session = Session::new();

        assert_eq!(
            replies(&mut session, &["INIT 2", "PUT a 1", "DEL a", "DEL a", "GET a"]),
            vec!["OK", "OK", "OK", "NULL", "NULL"]
        );
    }

    #[test]
    fn test_unknown_command_keeps_session_alive() {
        let mut session = Session::new();

        assert_eq!(
            replies(&mut session, &["INIT 1", "FLUSH", "PUT a 1", "GET a"]),
            vec!["OK", "ERROR: Unknown command: FLUSH", "OK", "1"]
        );
    }

    #[test]
    fn test_stats_line() {
        let mut session = Session::new();

        assert_eq!(
            replies(
                &mut session,
                &["INIT 2", "STATS", "PUT a 1", "GET a", "GET a", "GET b", "STATS"]
            ),
            vec![
                "OK",
                "hits:0 misses:0 hit_rate:0.00 evictions:0 expirations:0 size:0 capacity:2",
                "OK",
                "1",
                "1",
                "NULL",
                "hits:2 misses:1 hit_rate:66.67 evictions:0 expirations:0 size:1 capacity:2",
            ]
        );
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            capacity: Some(4),
            ..Config::default()
        };
        let session = Session::from_config(&config);
        assert_eq!(session.cache().map(Cache::capacity), Some(4));

        let config = Config {
            capacity: Some(0),
            ..Config::default()
        };
        assert!(Session::from_config(&config).cache().is_none());
        assert!(Session::from_config(&Config::default()).cache().is_none());
    }

    #[tokio::test]
    async fn test_run_writes_one_reply_per_command() {
        let input = "INIT 2\nPUT a 1\n\nGET a\nGET b\n";
        let mut output = Vec::new();
        let mut session = Session::new();

        run(BufReader::new(input.as_bytes()), &mut output, &mut session)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "OK\nOK\n1\nNULL\n");
    }

    #[test]
    fn test_invalid_utf8_line_is_an_error() {
        let mut session = Session::new();

        assert_eq!(
            session.handle_bytes(b"GET \xff\xfe\n").as_deref(),
            Some("ERROR: Invalid input: line is not valid UTF-8")
        );
        assert_eq!(session.handle_bytes(b"INIT 1\n").as_deref(), Some("OK"));
        assert_eq!(session.handle_bytes(b"\r\n"), None);
    }

    #[tokio::test]
    async fn test_run_continues_after_invalid_utf8() {
        let input: &[u8] = b"INIT 2\nPUT a 1\nGET \xff\xfe\nGET a\nSIZE";
        let mut output = Vec::new();
        let mut session = Session::new();

        run(BufReader::new(input), &mut output, &mut session)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "OK\nOK\nERROR: Invalid input: line is not valid UTF-8\n1\n1\n"
        );
    }

    #[tokio::test]
    async fn test_run_against_mock_io() {
        let mock = tokio_test::io::Builder::new()
            .read(b"INIT 1\n")
            .write(b"OK\n")
            .read(b"PUT a 1\n")
            .write(b"OK\n")
            .read(b"PUT b 2\n")
            .write(b"OK\n")
            .read(b"GET a\n")
            .write(b"NULL\n")
            .build();
        let (reader, writer) = tokio::io::split(mock);
        let mut session = Session::new();

        run(BufReader::new(reader), writer, &mut session)
            .await
            .unwrap();
    }
}
