//! Stopwatch, lap and countdown state machines for terminal applications
//!
//! State lives in one place and changes only through reducers, following a
//! Redux/Elm-inspired architecture. Reducers are pure: every action that
//! depends on the time carries a `now` reading in milliseconds, and anything
//! that has to happen later (the next display tick, a network request) is
//! returned as an effect for the runtime to carry out.
//!
//! # Core Concepts
//!
//! - **Clock**: start/stop/reset elapsed-time tracking that never runs backwards
//! - **LapLedger**: finalized laps with fastest/slowest tracking
//! - **Reducers**: [`reduce_stopwatch`] and [`reduce_countdown`]
//! - **EffectRuntime**: event/action/render loop with a [`TaskManager`] for ticks
//!
//! # Basic Example
//!
//! ```
//! use lapwatch_core::prelude::*;
//!
//! let mut store = EffectStore::new(StopwatchState::new(), reduce_stopwatch);
//!
//! let result = store.dispatch(StopwatchAction::Start { now: 0 });
//! assert_eq!(result.effects, vec![TimerEffect::ScheduleTick]);
//!
//! store.dispatch(StopwatchAction::Lap { now: 1000 });
//! store.dispatch(StopwatchAction::Lap { now: 1500 });
//!
//! let laps = &store.state().laps;
//! assert_eq!(laps.fastest().map(|l| l.number), Some(2));
//! assert_eq!(laps.slowest().map(|l| l.number), Some(1));
//! ```
//!
//! # Ticks
//!
//! A running timer keeps exactly one tick pending. The effect handler arms it
//! under a fixed [`TaskKey`]; re-arming replaces the old task and
//! `CancelTick` aborts it:
//!
//! ```ignore
//! fn handle_effect(effect: TimerEffect, ctx: &mut EffectContext<StopwatchAction>) {
//!     match effect {
//!         TimerEffect::ScheduleTick => {
//!             let time = time.clone();
//!             ctx.tasks().schedule("tick", tick_interval, async move {
//!                 StopwatchAction::Tick { now: time.now_ms() }
//!             });
//!         }
//!         TimerEffect::CancelTick => ctx.tasks().cancel(&"tick".into()),
//!     }
//! }
//! ```

pub mod action;
pub mod clock;
pub mod component;
pub mod countdown;
pub mod effect;
pub mod error;
pub mod event;
pub mod format;
pub mod laps;
pub mod runtime;
pub mod stopwatch;
pub mod store;
pub mod tasks;
pub mod testing;
pub mod time;

// Core trait exports
pub use action::Action;
pub use component::Component;

// State machines
pub use clock::Clock;
pub use countdown::{parse_duration, reduce_countdown, CountdownAction, CountdownState};
pub use laps::{Lap, LapLedger};
pub use stopwatch::{
    reduce_stopwatch, LapMark, LapRow, StopwatchAction, StopwatchState, TimerEffect,
};

pub use error::{DurationParseError, TransitionError};
pub use format::{format_clock, format_hms, format_hms_ceil};
pub use time::{ManualTime, MonotonicTime, TimeSource};

// Event system exports
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};

// Store exports
pub use effect::{DispatchResult, EffectReducer, EffectStore};
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware};

// Runtime exports
pub use runtime::{EffectContext, EffectRuntime, EventOutcome, PollerConfig};
pub use tasks::{TaskKey, TaskManager};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, key, ActionAssertions, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::clock::Clock;
    pub use crate::component::Component;
    pub use crate::countdown::{parse_duration, reduce_countdown, CountdownAction, CountdownState};
    pub use crate::effect::{DispatchResult, EffectReducer, EffectStore};
    pub use crate::event::EventKind;
    pub use crate::format::{format_clock, format_hms, format_hms_ceil};
    pub use crate::laps::{Lap, LapLedger};
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome, PollerConfig};
    pub use crate::stopwatch::{
        reduce_stopwatch, LapMark, LapRow, StopwatchAction, StopwatchState, TimerEffect,
    };
    pub use crate::store::{LoggingMiddleware, Middleware, NoopMiddleware};
    pub use crate::tasks::{TaskKey, TaskManager};
    pub use crate::time::{ManualTime, MonotonicTime, TimeSource};

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
