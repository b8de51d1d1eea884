//! Effect handler - turns reducer effects into tasks
//!
//! Each timer keeps a single tick task under its own key. Scheduling replaces
//! the pending tick, so a running timer never has more than one in flight.
//! The tick reads the time source when it fires, not when it is scheduled.

use std::time::Duration;

use lapwatch_core::{
    CountdownAction, EffectContext, StopwatchAction, TimeSource, TimerEffect,
};

use crate::action::Action;
use crate::api;
use crate::effect::Effect;

pub struct EffectHandler<T> {
    time: T,
    tick_interval: Duration,
}

impl<T: TimeSource> EffectHandler<T> {
    pub fn new(time: T, tick_interval: Duration) -> Self {
        Self {
            time,
            tick_interval,
        }
    }

    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        let key = effect.task_key();
        match effect {
            Effect::StopwatchTick(TimerEffect::ScheduleTick) => {
                let time = self.time.clone();
                ctx.tasks().schedule(key, self.tick_interval, async move {
                    Action::Stopwatch(StopwatchAction::Tick {
                        now: time.now_ms(),
                    })
                });
            }
            Effect::CountdownTick(TimerEffect::ScheduleTick) => {
                let time = self.time.clone();
                ctx.tasks().schedule(key, self.tick_interval, async move {
                    Action::Countdown(CountdownAction::Tick {
                        now: time.now_ms(),
                    })
                });
            }
            Effect::StopwatchTick(TimerEffect::CancelTick)
            | Effect::CountdownTick(TimerEffect::CancelTick) => {
                ctx.tasks().cancel(&key);
            }
            Effect::FetchQuote { url } => {
                ctx.tasks().spawn(key, async move {
                    match api::fetch_random_quote(&url).await {
                        Ok(quote) => Action::QuoteDidLoad(quote),
                        Err(e) => {
                            tracing::warn!(error = %e, %url, "Giving up on quote");
                            Action::QuoteDidError(e.to_string())
                        }
                    }
                });
            }
        }
    }
}
