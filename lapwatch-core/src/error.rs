//! Error types for the timer state machines
//!
//! None of these are fatal. Reducers log them and leave state untouched;
//! input errors are rejected at the boundary before any action is dispatched.

use thiserror::Error;

/// A state transition that is not allowed in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot reset while the clock is running")]
    ResetWhileRunning,
    #[error("cannot record a lap while the clock is stopped")]
    LapWhileStopped,
    #[error("cannot record a lap before any time has elapsed")]
    LapBeforeElapsed,
    #[error("cannot change the countdown duration while it is running")]
    DurationWhileRunning,
    #[error("countdown has no duration set")]
    NoDuration,
    #[error("countdown has already expired")]
    Expired,
}

/// Rejected countdown duration input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,
    #[error("'{0}' is not a number")]
    NotNumeric(String),
    #[error("too many ':' separated fields")]
    TooManyFields,
    #[error("{field} must be below 60, got {value}")]
    OutOfRange { field: &'static str, value: u64 },
    #[error("duration must be greater than zero")]
    Zero,
    #[error("duration is too large")]
    Overflow,
}
