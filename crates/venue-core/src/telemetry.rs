//! Centralised tracing initialisation for the venue recommendation binaries.
//!
//! Log lines go to stderr so command output on stdout stays machine-readable.
//! Only the first initialisation in a process takes effect.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::{ConfigError, LoggerConfig};

/// Initialise the global tracing subscriber.
///
/// * `json` — emit newline-delimited JSON log lines.
/// * `level` — default verbosity when `RUST_LOG` is not set.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let output = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let output = if json {
        output.json().boxed()
    } else {
        output.boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(output)
        .try_init()
        .ok();
}

/// Initialise from the `[logger]` section; `verbose` forces DEBUG.
pub fn init_from_config(logger: &LoggerConfig, json: bool, verbose: bool) -> Result<(), ConfigError> {
    let level = if verbose {
        Level::DEBUG
    } else {
        logger.tracing_level()?
    };
    init_tracing(json || logger.json, level);
    Ok(())
}
