//! Stopwatch: a [`Clock`] plus a [`LapLedger`] driven by a reducer
//!
//! All stopwatch behavior goes through [`reduce_stopwatch`]. Actions that
//! need the time carry a `now` reading; the reducer itself never looks at a
//! clock. While running, every `Tick` asks for the next one with
//! [`TimerEffect::ScheduleTick`]; stopping emits [`TimerEffect::CancelTick`].

use crate::clock::Clock;
use crate::effect::DispatchResult;
use crate::error::TransitionError;
use crate::laps::{Lap, LapLedger};
use crate::Action;

/// Side effects requested by the timer reducers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEffect {
    /// Arm (or re-arm) the single pending tick callback.
    ScheduleTick,
    /// Cancel the pending tick callback.
    CancelTick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopwatchAction {
    Start { now: u64 },
    Stop { now: u64 },
    /// Start when stopped, stop when running
    Toggle { now: u64 },
    Lap { now: u64 },
    Reset,
    /// Lap while running, reset while stopped
    LapOrReset { now: u64 },
    Tick { now: u64 },
}

impl Action for StopwatchAction {
    fn name(&self) -> &'static str {
        match self {
            StopwatchAction::Start { .. } => "Start",
            StopwatchAction::Stop { .. } => "Stop",
            StopwatchAction::Toggle { .. } => "Toggle",
            StopwatchAction::Lap { .. } => "Lap",
            StopwatchAction::Reset => "Reset",
            StopwatchAction::LapOrReset { .. } => "LapOrReset",
            StopwatchAction::Tick { .. } => "Tick",
        }
    }
}

/// Highlight for a lap row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LapMark {
    #[default]
    None,
    Fastest,
    Slowest,
}

/// One line of the lap table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LapRow {
    pub number: u32,
    pub duration_ms: u64,
    /// The lap in progress, still growing
    pub provisional: bool,
    pub mark: LapMark,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopwatchState {
    pub clock: Clock,
    pub laps: LapLedger,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn elapsed(&self) -> u64 {
        self.clock.elapsed()
    }

    /// Duration of the lap in progress.
    pub fn provisional_duration(&self) -> u64 {
        self.laps.provisional_duration(self.clock.elapsed())
    }

    /// Close the lap in progress at `now`.
    pub fn record_lap(&mut self, now: u64) -> Result<Lap, TransitionError> {
        if !self.clock.is_running() {
            return Err(TransitionError::LapWhileStopped);
        }
        self.clock.tick(now);
        if self.clock.elapsed() == 0 {
            return Err(TransitionError::LapBeforeElapsed);
        }
        Ok(self.laps.record(self.clock.elapsed()))
    }

    /// Clear the clock and the laps together. Only allowed while stopped.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.clock.reset()?;
        self.laps.clear();
        Ok(())
    }

    /// Rows for display: the lap in progress (once the clock has moved),
    /// then finalized laps newest first. Fastest/slowest marks only appear
    /// once two laps are finalized.
    pub fn lap_rows(&self) -> Vec<LapRow> {
        let mut rows = Vec::with_capacity(self.laps.len() + 1);
        if self.clock.elapsed() > 0 {
            rows.push(LapRow {
                number: self.laps.current_number(),
                duration_ms: self.provisional_duration(),
                provisional: true,
                mark: LapMark::None,
            });
        }

        let fastest = self.laps.fastest().map(|l| l.number);
        let slowest = self.laps.slowest().map(|l| l.number);
        rows.extend(self.laps.newest_first().map(|lap| LapRow {
            number: lap.number,
            duration_ms: lap.duration_ms,
            provisional: false,
            mark: if Some(lap.number) == fastest {
                LapMark::Fastest
            } else if Some(lap.number) == slowest {
                LapMark::Slowest
            } else {
                LapMark::None
            },
        }));
        rows
    }
}

/// Apply a stopwatch action.
///
/// Invalid transitions (lap while stopped, reset while running) are logged
/// and ignored.
pub fn reduce_stopwatch(
    state: &mut StopwatchState,
    action: StopwatchAction,
) -> DispatchResult<TimerEffect> {
    match action {
        StopwatchAction::Start { now } => start(state, now),
        StopwatchAction::Stop { now } => stop(state, now),
        StopwatchAction::Toggle { now } => {
            if state.is_running() {
                stop(state, now)
            } else {
                start(state, now)
            }
        }
        StopwatchAction::Lap { now } => lap(state, now),
        StopwatchAction::Reset => reset(state),
        StopwatchAction::LapOrReset { now } => {
            if state.is_running() {
                lap(state, now)
            } else {
                reset(state)
            }
        }
        StopwatchAction::Tick { now } => {
            // A tick already queued when the clock stopped
            if !state.is_running() {
                return DispatchResult::unchanged();
            }
            DispatchResult {
                changed: state.clock.tick(now),
                effects: vec![TimerEffect::ScheduleTick],
            }
        }
    }
}

fn start(state: &mut StopwatchState, now: u64) -> DispatchResult<TimerEffect> {
    if state.clock.start(now) {
        DispatchResult::changed_with(TimerEffect::ScheduleTick)
    } else {
        DispatchResult::unchanged()
    }
}

fn stop(state: &mut StopwatchState, now: u64) -> DispatchResult<TimerEffect> {
    if state.clock.stop(now) {
        DispatchResult::changed_with(TimerEffect::CancelTick)
    } else {
        DispatchResult::unchanged()
    }
}

fn lap(state: &mut StopwatchState, now: u64) -> DispatchResult<TimerEffect> {
    match state.record_lap(now) {
        Ok(lap) => {
            tracing::debug!(lap = lap.number, duration_ms = lap.duration_ms, "Lap recorded");
            DispatchResult::changed()
        }
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring lap");
            DispatchResult::unchanged()
        }
    }
}

fn reset(state: &mut StopwatchState) -> DispatchResult<TimerEffect> {
    if *state == StopwatchState::default() {
        return DispatchResult::unchanged();
    }
    match state.reset() {
        Ok(()) => DispatchResult::changed(),
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring reset");
            DispatchResult::unchanged()
        }
    }
}
