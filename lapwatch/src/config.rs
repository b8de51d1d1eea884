//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lapwatch_core::{parse_duration, DurationParseError, PollerConfig};

use crate::state::{Mode, DEFAULT_QUOTE_URL};

pub const MIN_TICK_MS: u64 = 10;
pub const MAX_TICK_MS: u64 = 1000;
pub const MAX_POLL_MS: u64 = 100;

/// Terminal stopwatch with laps, a countdown and a quote screen
#[derive(Parser, Debug, Clone)]
#[command(name = "lapwatch")]
#[command(about = "A terminal stopwatch with lap times, a countdown and a quote of the moment")]
pub struct Args {
    /// Screen to start on
    #[arg(long, short, value_enum, default_value_t = Mode::Stopwatch)]
    pub mode: Mode,

    /// Display refresh interval in milliseconds (clamped to 10..=1000)
    #[arg(long, default_value_t = 30)]
    pub tick_ms: u64,

    /// Pause between keyboard polls in milliseconds (clamped to 1..=100)
    #[arg(long, default_value_t = 16)]
    pub poll_ms: u64,

    /// Initial countdown duration: SS, MM:SS or HH:MM:SS
    #[arg(long, short)]
    pub countdown: Option<String>,

    /// Quote list endpoint (JSON array of { text, author })
    #[arg(long, default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// Write logs to this file (logging is off without it)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS))
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            loop_sleep: Duration::from_millis(self.poll_ms.clamp(1, MAX_POLL_MS)),
            ..PollerConfig::default()
        }
    }

    /// Parsed `--countdown`, if given.
    pub fn initial_countdown(&self) -> Result<Option<u64>, DurationParseError> {
        self.countdown.as_deref().map(parse_duration).transpose()
    }
}
