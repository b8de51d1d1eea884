//! Effects - side effects declared by the reducer

use lapwatch_core::{TaskKey, TimerEffect};

pub const STOPWATCH_TICK: &str = "stopwatch-tick";
pub const COUNTDOWN_TICK: &str = "countdown-tick";
pub const QUOTE_TASK: &str = "quote";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    StopwatchTick(TimerEffect),
    CountdownTick(TimerEffect),
    /// Fetch the quote list and pick one
    FetchQuote { url: String },
}

impl Effect {
    /// Task the effect runs under. Each timer owns one tick key, so re-arming
    /// replaces the pending tick.
    pub fn task_key(&self) -> TaskKey {
        match self {
            Effect::StopwatchTick(_) => TaskKey::new(STOPWATCH_TICK),
            Effect::CountdownTick(_) => TaskKey::new(COUNTDOWN_TICK),
            Effect::FetchQuote { .. } => TaskKey::new(QUOTE_TASK),
        }
    }
}
