//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// `verbose` raises the crate's own events to debug.
pub fn init_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        format!("{},weatherdash=debug", logging.level)
    } else {
        logging.level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&default_directive))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
