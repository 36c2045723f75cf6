//! Diagnostic logging to stderr.
//!
//! Verbosity comes from `RUST_LOG` (default `warn`), so stdout only carries
//! the confirmation line.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

const C_LOG_FILTER_DEFAULT: &str = "warn";

/// Install the global `tracing` subscriber. Call once at startup.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(C_LOG_FILTER_DEFAULT));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialize logging: {err}"))
}
