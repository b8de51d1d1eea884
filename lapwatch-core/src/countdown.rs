//! Countdown timer built on the same [`Clock`] as the stopwatch
//!
//! Remaining time is `duration - elapsed`. When a tick finds nothing left the
//! clock stops and the countdown is marked expired until it is reset or given
//! a new duration.

use crate::clock::Clock;
use crate::effect::DispatchResult;
use crate::error::{DurationParseError, TransitionError};
use crate::stopwatch::TimerEffect;
use crate::Action;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CountdownAction {
    /// Replace the duration. Only accepted while stopped.
    SetDuration(u64),
    Start { now: u64 },
    Stop { now: u64 },
    Toggle { now: u64 },
    Reset,
    Tick { now: u64 },
}

impl Action for CountdownAction {
    fn name(&self) -> &'static str {
        match self {
            CountdownAction::SetDuration(_) => "SetDuration",
            CountdownAction::Start { .. } => "Start",
            CountdownAction::Stop { .. } => "Stop",
            CountdownAction::Toggle { .. } => "Toggle",
            CountdownAction::Reset => "Reset",
            CountdownAction::Tick { .. } => "Tick",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountdownState {
    pub clock: Clock,
    pub duration_ms: Option<u64>,
    pub expired: bool,
}

impl CountdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Time left, or `None` when no duration is set.
    pub fn remaining(&self) -> Option<u64> {
        self.duration_ms
            .map(|d| d.saturating_sub(self.clock.elapsed()))
    }

    /// Fraction of the duration already used, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        match self.duration_ms {
            Some(0) | None => 0.0,
            Some(d) => (self.clock.elapsed() as f64 / d as f64).min(1.0),
        }
    }

    fn set_duration(&mut self, duration_ms: u64) -> Result<(), TransitionError> {
        if self.clock.is_running() {
            return Err(TransitionError::DurationWhileRunning);
        }
        self.clock.reset()?;
        self.duration_ms = Some(duration_ms);
        self.expired = false;
        Ok(())
    }

    fn start(&mut self, now: u64) -> Result<bool, TransitionError> {
        if self.duration_ms.is_none() {
            return Err(TransitionError::NoDuration);
        }
        if self.expired {
            return Err(TransitionError::Expired);
        }
        Ok(self.clock.start(now))
    }

    fn reset(&mut self) -> Result<(), TransitionError> {
        self.clock.reset()?;
        self.expired = false;
        Ok(())
    }
}

/// Apply a countdown action. Invalid transitions are logged and ignored.
pub fn reduce_countdown(
    state: &mut CountdownState,
    action: CountdownAction,
) -> DispatchResult<TimerEffect> {
    match action {
        CountdownAction::SetDuration(ms) => match state.set_duration(ms) {
            Ok(()) => DispatchResult::changed(),
            Err(err) => ignored(err),
        },
        CountdownAction::Start { now } => start(state, now),
        CountdownAction::Stop { now } => stop(state, now),
        CountdownAction::Toggle { now } => {
            if state.is_running() {
                stop(state, now)
            } else {
                start(state, now)
            }
        }
        CountdownAction::Reset => match state.reset() {
            Ok(()) => DispatchResult::changed(),
            Err(err) => ignored(err),
        },
        CountdownAction::Tick { now } => {
            if !state.is_running() {
                return DispatchResult::unchanged();
            }
            let changed = state.clock.tick(now);
            if state.remaining() == Some(0) {
                state.clock.stop(now);
                state.expired = true;
                tracing::info!("Countdown finished");
                return DispatchResult::changed_with(TimerEffect::CancelTick);
            }
            DispatchResult {
                changed,
                effects: vec![TimerEffect::ScheduleTick],
            }
        }
    }
}

fn start(state: &mut CountdownState, now: u64) -> DispatchResult<TimerEffect> {
    match state.start(now) {
        Ok(true) => DispatchResult::changed_with(TimerEffect::ScheduleTick),
        Ok(false) => DispatchResult::unchanged(),
        Err(err) => ignored(err),
    }
}

fn stop(state: &mut CountdownState, now: u64) -> DispatchResult<TimerEffect> {
    if !state.clock.stop(now) {
        return DispatchResult::unchanged();
    }
    // Stopped with nothing left counts as finished, same as the last tick
    if state.remaining() == Some(0) {
        state.expired = true;
        tracing::info!("Countdown finished");
    }
    DispatchResult::changed_with(TimerEffect::CancelTick)
}

fn ignored(err: TransitionError) -> DispatchResult<TimerEffect> {
    tracing::debug!(error = %err, "Ignoring countdown action");
    DispatchResult::unchanged()
}

/// Parse `SS`, `MM:SS` or `HH:MM:SS` into milliseconds.
///
/// The leading field is unbounded (`90` is ninety seconds, `90:00` is ninety
/// minutes); later fields must be below 60.
pub fn parse_duration(input: &str) -> Result<u64, DurationParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let fields: Vec<&str> = input.split(':').collect();
    if fields.len() > 3 {
        return Err(DurationParseError::TooManyFields);
    }

    let mut values = Vec::with_capacity(fields.len());
    for field in &fields {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DurationParseError::NotNumeric((*field).to_string()));
        }
        let value = field
            .parse::<u64>()
            .map_err(|_| DurationParseError::Overflow)?;
        values.push(value);
    }

    // Bounded fields, right to left
    let names = ["seconds", "minutes"];
    for (i, value) in values.iter().rev().enumerate().take(values.len() - 1) {
        if *value >= 60 {
            return Err(DurationParseError::OutOfRange {
                field: names[i],
                value: *value,
            });
        }
    }

    let secs = values
        .iter()
        .try_fold(0u64, |acc, v| acc.checked_mul(60)?.checked_add(*v))
        .ok_or(DurationParseError::Overflow)?;
    let ms = secs
        .checked_mul(1000)
        .ok_or(DurationParseError::Overflow)?;
    if ms == 0 {
        return Err(DurationParseError::Zero);
    }
    Ok(ms)
}
