// src/logging.rs
// =============================================================================
// Sets up the tracing subscriber.
//
// Logs go to stderr so they never mix with the progress lines on stdout.
// RUST_LOG wins when it is set; otherwise --verbose/--quiet pick the level.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
