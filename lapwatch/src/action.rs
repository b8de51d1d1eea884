//! Application actions
//!
//! Timer actions wrap the core state machine actions unchanged. Naming
//! follows the intent/result convention: `QuoteFetch` starts a request,
//! `QuoteDidLoad` / `QuoteDidError` carry the outcome back.

use crate::state::Quote;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Stopwatch(lapwatch_core::StopwatchAction),
    Countdown(lapwatch_core::CountdownAction),

    /// Typed into the duration field
    DurationInput(char),
    DurationBackspace,
    /// Validate the duration field and load it into the countdown
    DurationSubmit,

    QuoteFetch,
    QuoteDidLoad(Quote),
    QuoteDidError(String),

    /// Switch to the next screen
    UiNextMode,

    Quit,
}

impl lapwatch_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            // Inner names so `Tick` stays quiet in the logging middleware
            Action::Stopwatch(inner) => lapwatch_core::Action::name(inner),
            Action::Countdown(inner) => lapwatch_core::Action::name(inner),
            Action::DurationInput(_) => "DurationInput",
            Action::DurationBackspace => "DurationBackspace",
            Action::DurationSubmit => "DurationSubmit",
            Action::QuoteFetch => "QuoteFetch",
            Action::QuoteDidLoad(_) => "QuoteDidLoad",
            Action::QuoteDidError(_) => "QuoteDidError",
            Action::UiNextMode => "UiNextMode",
            Action::Quit => "Quit",
        }
    }
}
