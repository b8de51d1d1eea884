//! Reducers that describe their side effects
//!
//! A reducer mutates state and hands back what should happen next (arm a
//! tick, cancel a tick, fetch a quote) as plain values. Nothing is performed
//! here; the runtime owns tasks and carries the effects out after the
//! reducer returns.
//!
//! ```ignore
//! fn reducer(state: &mut StopwatchState, action: StopwatchAction) -> DispatchResult<TimerEffect> {
//!     match action {
//!         StopwatchAction::Start { now } => {
//!             state.clock.start(now);
//!             DispatchResult::changed_with(TimerEffect::ScheduleTick)
//!         }
//!         // ...
//!     }
//! }
//!
//! let mut store = EffectStore::new(StopwatchState::default(), reducer);
//! for effect in store.dispatch(StopwatchAction::Start { now: 0 }).effects {
//!     // arm the tick task
//! }
//! ```

use crate::action::Action;
use crate::store::{Middleware, NoopMiddleware};

/// What a reducer reports back: whether anything visible changed, and the
/// effects to run afterwards in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    fn build(changed: bool, effects: Vec<E>) -> Self {
        Self { changed, effects }
    }

    /// Rejected or redundant action.
    #[inline]
    pub fn unchanged() -> Self {
        Self::build(false, Vec::new())
    }

    #[inline]
    pub fn changed() -> Self {
        Self::build(true, Vec::new())
    }

    /// Effect only; state untouched (e.g. re-arming a tick).
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self::build(false, vec![effect])
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self::build(true, vec![effect])
    }

    /// Append another effect after the ones already queued.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Lift a sub-reducer's effects into a wider effect type, e.g.
    /// `TimerEffect` into the app's `Effect::StopwatchTick`.
    pub fn map<F, E2>(self, f: F) -> DispatchResult<E2>
    where
        F: FnMut(E) -> E2,
    {
        let Self { changed, effects } = self;
        DispatchResult::build(changed, effects.into_iter().map(f).collect())
    }
}

pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Owns state and its reducer.
///
/// Every dispatch passes through the middleware `M`, which sees the action
/// and whether the state changed but never the effects. Without middleware
/// the store uses [`NoopMiddleware`].
pub struct EffectStore<S, A, E, M = NoopMiddleware> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
}

impl<S, A: Action, E> EffectStore<S, A, E> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStore<S, A, E, M> {
    pub fn with_middleware(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum Button {
        Start,
        Stop,
        Lap,
    }

    impl Action for Button {
        fn name(&self) -> &'static str {
            match self {
                Button::Start => "Start",
                Button::Stop => "Stop",
                Button::Lap => "Lap",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Tick {
        Arm,
        Disarm,
    }

    #[derive(Default)]
    struct Running(bool);

    fn toggle(state: &mut Running, button: Button) -> DispatchResult<Tick> {
        match button {
            Button::Start if !state.0 => {
                state.0 = true;
                DispatchResult::changed_with(Tick::Arm)
            }
            Button::Stop if state.0 => {
                state.0 = false;
                DispatchResult::changed_with(Tick::Disarm)
            }
            _ => DispatchResult::unchanged(),
        }
    }

    #[test]
    fn builders_set_flag_and_effects() {
        let r: DispatchResult<Tick> = DispatchResult::default();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::effect(Tick::Arm);
        assert!(!r.changed);
        assert_eq!(r.effects, vec![Tick::Arm]);

        let r = DispatchResult::changed().with(Tick::Disarm).with(Tick::Arm);
        assert!(r.changed);
        assert_eq!(r.effects, vec![Tick::Disarm, Tick::Arm]);

        assert!(DispatchResult::<Tick>::unchanged().mark_changed().changed);
    }

    #[test]
    fn map_keeps_order_and_flag() {
        let mapped = DispatchResult::changed_with(Tick::Arm)
            .with(Tick::Disarm)
            .map(|tick| format!("stopwatch:{tick:?}"));
        assert!(mapped.changed);
        assert_eq!(mapped.effects, ["stopwatch:Arm", "stopwatch:Disarm"]);
    }

    #[test]
    fn store_rejects_repeated_start() {
        let mut store = EffectStore::new(Running::default(), toggle);

        assert_eq!(store.dispatch(Button::Start).effects, vec![Tick::Arm]);
        assert!(store.state().0);
        assert_eq!(store.dispatch(Button::Start), DispatchResult::unchanged());
        assert_eq!(store.dispatch(Button::Stop).effects, vec![Tick::Disarm]);
        assert!(!store.dispatch(Button::Lap).changed);
    }

    /// Records the names it saw and how many dispatches changed state.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<&'static str>,
        changes: usize,
    }

    impl Middleware<Button> for Recorder {
        fn before(&mut self, action: &Button) {
            self.seen.push(action.name());
        }

        fn after(&mut self, _action: &Button, state_changed: bool) {
            self.changes += usize::from(state_changed);
        }
    }

    #[test]
    fn middleware_sees_every_dispatch() {
        let mut store =
            EffectStore::with_middleware(Running::default(), toggle, Recorder::default());

        store.dispatch(Button::Start);
        store.dispatch(Button::Lap);
        store.dispatch(Button::Stop);

        assert_eq!(store.middleware().seen, ["Start", "Lap", "Stop"]);
        assert_eq!(store.middleware().changes, 2);
        assert!(!store.state().0);
    }
}
