//! Tracing setup
//!
//! The terminal belongs to the UI, so logs only go to a file. `RUST_LOG`
//! wins over `--log-level` when set.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `level`.
pub fn env_filter(level: &str) -> Result<EnvFilter, ParseError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level),
    }
}

/// Install the global subscriber writing to `log_file`.
///
/// Returns `false` without installing anything when no file is given.
pub fn init(log_file: Option<&Path>, level: &str) -> io::Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let filter =
        env_filter(level).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %path.display(), "Logging started");
    Ok(true)
}
