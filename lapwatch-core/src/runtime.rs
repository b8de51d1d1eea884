//! Event/action/render loop for effect-based stores
//!
//! One `tokio::select!` loop owns the store. Terminal events and actions
//! produced by tasks are handled one at a time, so reducers never run
//! concurrently and state needs no locking.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effect::{EffectReducer, EffectStore};
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::store::{Middleware, NoopMiddleware};
use crate::tasks::TaskManager;
use crate::Action;

/// How often the background thread asks crossterm for input.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Actions produced by one terminal event, plus whether the screen must be
/// redrawn even if no action changes state (a resize, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self::from_actions(actions)
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        Self::from_actions(action)
    }
}

/// Handed to the effect handler for each effect of one dispatch.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<A: Action> EffectContext<'_, A> {
    /// Queue an action behind the ones already waiting.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Owns the store, the action queue and the [`TaskManager`] for one
/// session.
///
/// Pending tasks are cancelled when [`run`](Self::run) returns and again
/// when the runtime is dropped.
pub struct EffectRuntime<S, A: Action, E, M = NoopMiddleware> {
    store: EffectStore<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    should_render: bool,
    tasks: TaskManager<A>,
}

impl<S, A: Action, E> EffectRuntime<S, A, E> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    pub fn from_store(store: EffectStore<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
            tasks,
        }
    }

    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Queue an action, e.g. a fetch to run as soon as the loop starts.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Dispatch one action and hand its effects to `handle_effect`.
    ///
    /// Returns whether the state changed.
    pub fn dispatch<FEffect>(&mut self, action: A, handle_effect: &mut FEffect) -> bool
    where
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = EffectContext {
                action_tx: &self.action_tx,
                tasks: &mut self.tasks,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        result.changed
    }

    /// Wait for the next queued action and dispatch it.
    ///
    /// Drives the runtime without a terminal, e.g. from tests.
    pub async fn step<FEffect>(&mut self, handle_effect: &mut FEffect) -> Option<(A, bool)>
    where
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let action = self.action_rx.recv().await?;
        let changed = self.dispatch(action.clone(), handle_effect);
        Some((action, changed))
    }

    /// Run the event/action loop until `should_quit` accepts an action.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }
                    if self.dispatch(action, &mut handle_effect) {
                        self.should_render = true;
                    }
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DispatchResult;

    #[derive(Clone, Debug, PartialEq)]
    enum Beep {
        Arm,
        Ring,
    }

    impl Action for Beep {
        fn name(&self) -> &'static str {
            match self {
                Beep::Arm => "Arm",
                Beep::Ring => "Ring",
            }
        }
    }

    #[derive(Debug)]
    struct RingLater;

    fn count_beeps(rings: &mut u32, action: Beep) -> DispatchResult<RingLater> {
        match action {
            Beep::Arm => DispatchResult::effect(RingLater),
            Beep::Ring => {
                *rings += 1;
                DispatchResult::changed()
            }
        }
    }

    fn arm_alarm(_: RingLater, ctx: &mut EffectContext<Beep>) {
        ctx.tasks()
            .schedule("alarm", Duration::from_millis(20), async { Beep::Ring });
    }

    #[test]
    fn outcome_from_option_and_vec() {
        let outcome: EventOutcome<Beep> = Some(Beep::Arm).into();
        assert_eq!(outcome.actions, vec![Beep::Arm]);
        assert!(!outcome.needs_render);

        let outcome: EventOutcome<Beep> = None.into();
        assert_eq!(outcome, EventOutcome::ignored());

        let outcome: EventOutcome<Beep> = vec![Beep::Arm, Beep::Ring].into();
        assert_eq!(outcome.actions.len(), 2);

        assert!(EventOutcome::action(Beep::Ring).with_render().needs_render);
    }

    #[tokio::test(start_paused = true)]
    async fn step_hands_effects_to_tasks() {
        let mut runtime = EffectRuntime::new(0u32, count_beeps);
        let mut handle = arm_alarm;

        runtime.enqueue(Beep::Arm);
        let (action, changed) = runtime.step(&mut handle).await.expect("queue open");
        assert_eq!(action, Beep::Arm);
        assert!(!changed);
        assert!(runtime.tasks().is_pending(&"alarm".into()));

        let (action, changed) = runtime.step(&mut handle).await.expect("queue open");
        assert_eq!(action, Beep::Ring);
        assert!(changed);
        assert_eq!(*runtime.state(), 1);
    }

    #[tokio::test]
    async fn emit_queues_behind_pending_actions() {
        fn echo(_: RingLater, ctx: &mut EffectContext<Beep>) {
            ctx.emit(Beep::Ring);
        }

        let mut runtime = EffectRuntime::new(0u32, count_beeps);
        let mut handle = echo;
        runtime.enqueue(Beep::Arm);
        runtime.enqueue(Beep::Arm);

        let mut order = Vec::new();
        for _ in 0..4 {
            let (action, _) = runtime.step(&mut handle).await.expect("queue open");
            order.push(action);
        }
        assert_eq!(order, [Beep::Arm, Beep::Arm, Beep::Ring, Beep::Ring]);
    }
}
