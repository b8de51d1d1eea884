//! Application state - everything the screens render from

use std::collections::BTreeMap;

use clap::ValueEnum;
use lapwatch_core::{CountdownState, StopwatchState};
use serde::Deserialize;

/// Public quote list used by the original quote demo
pub const DEFAULT_QUOTE_URL: &str = "https://type.fit/api/quotes";

/// Which screen is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[default]
    Stopwatch,
    Countdown,
    Quote,
}

impl Mode {
    /// Next screen, wrapping around
    pub fn next(self) -> Self {
        match self {
            Mode::Stopwatch => Mode::Countdown,
            Mode::Countdown => Mode::Quote,
            Mode::Quote => Mode::Stopwatch,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Stopwatch => "Stopwatch",
            Mode::Countdown => "Countdown",
            Mode::Quote => "Quote",
        }
    }
}

/// One entry of the quote list
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteState {
    pub quote: Option<Quote>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Text field backing the countdown duration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DurationInput {
    pub value: String,
    /// Field name -> message, empty when the last submit was valid
    pub errors: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub mode: Mode,
    pub stopwatch: StopwatchState,
    pub countdown: CountdownState,
    pub duration_input: DurationInput,
    pub quote: QuoteState,
    pub quote_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            stopwatch: StopwatchState::new(),
            countdown: CountdownState::new(),
            duration_input: DurationInput::default(),
            quote: QuoteState::default(),
            quote_url: DEFAULT_QUOTE_URL.to_string(),
        }
    }
}

impl AppState {
    pub fn new(mode: Mode, quote_url: impl Into<String>) -> Self {
        Self {
            mode,
            quote_url: quote_url.into(),
            ..Self::default()
        }
    }

    /// Preload the countdown with a duration already validated by the caller.
    pub fn with_countdown(mut self, duration_ms: u64, input: impl Into<String>) -> Self {
        self.countdown = CountdownState::with_duration(duration_ms);
        self.duration_input.value = input.into();
        self
    }
}
