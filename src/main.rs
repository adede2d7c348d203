//! LRU TTL Cache - command-line front end
//!
//! Reads commands from stdin and prints one reply per command on stdout.
//! Logs go to stderr so stdout carries protocol replies only.

use anyhow::Context;
use tokio::io::{self, BufReader};
use tokio::runtime;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::protocol::{run, Session};
use lru_ttl_cache::Config;

/// Main entry point.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber writing to stderr
/// 3. Create the session, pre-initialising the cache if configured
/// 4. Process stdin until EOF or Ctrl+C
///
/// The runtime is shut down without waiting on the blocking stdin reader,
/// which cannot be cancelled while it waits for input.
fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let rt = runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let result = rt.block_on(serve(&config));
    rt.shutdown_background();
    result
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    info!(capacity = ?config.capacity, "starting command loop");

    let mut session = Session::from_config(config);
    let reader = BufReader::new(io::stdin());
    let writer = io::stdout();

    tokio::select! {
        result = run(reader, writer, &mut session) => {
            result.context("failed to process commands")?;
            info!("input closed, shutting down");
        }
        result = signal::ctrl_c() => {
            result.context("failed to install Ctrl+C handler")?;
            warn!("received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
