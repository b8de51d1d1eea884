//! Tick effects through the app reducer, handler and runtime

use std::time::Duration;

use lapwatch::action::Action;
use lapwatch::effect::{Effect, COUNTDOWN_TICK, STOPWATCH_TICK};
use lapwatch::handler::EffectHandler;
use lapwatch::reducer::reducer;
use lapwatch::state::{AppState, Mode};
use lapwatch_core::{
    CountdownAction, EffectContext, EffectRuntime, EffectStore, LoggingMiddleware,
    ManualTime, StopwatchAction,
};

const TICK: Duration = Duration::from_millis(30);

fn effects(
    handler: &EffectHandler<ManualTime>,
) -> impl FnMut(Effect, &mut EffectContext<Action>) + '_ {
    move |effect, ctx| handler.handle(effect, ctx)
}

#[tokio::test(start_paused = true)]
async fn stopwatch_tick_reads_time_when_it_fires() {
    let time = ManualTime::new(0);
    let handler = EffectHandler::new(time.clone(), TICK);
    let mut handle = effects(&handler);

    let store =
        EffectStore::with_middleware(AppState::default(), reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store);

    runtime.enqueue(Action::Stopwatch(StopwatchAction::Start { now: 0 }));
    runtime.step(&mut handle).await.expect("queue open");
    assert!(runtime.tasks().is_pending(&STOPWATCH_TICK.into()));

    time.set(1250);
    let (action, changed) = runtime.step(&mut handle).await.expect("queue open");
    assert_eq!(action, Action::Stopwatch(StopwatchAction::Tick { now: 1250 }));
    assert!(changed);
    assert_eq!(runtime.state().stopwatch.elapsed(), 1250);

    runtime.enqueue(Action::Stopwatch(StopwatchAction::Stop { now: 1300 }));
    runtime.step(&mut handle).await.expect("queue open");
    assert!(!runtime.tasks().is_pending(&STOPWATCH_TICK.into()));
    assert_eq!(runtime.state().stopwatch.elapsed(), 1300);
}

#[tokio::test(start_paused = true)]
async fn timers_tick_independently() {
    let time = ManualTime::new(0);
    let handler = EffectHandler::new(time.clone(), TICK);
    let mut handle = effects(&handler);

    let state = AppState::new(Mode::Countdown, "http://localhost").with_countdown(60_000, "60");
    let store = EffectStore::with_middleware(state, reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store);

    runtime.enqueue(Action::Stopwatch(StopwatchAction::Start { now: 0 }));
    runtime.enqueue(Action::Countdown(CountdownAction::Start { now: 0 }));
    runtime.step(&mut handle).await.expect("queue open");
    runtime.step(&mut handle).await.expect("queue open");

    assert!(runtime.tasks().is_pending(&STOPWATCH_TICK.into()));
    assert!(runtime.tasks().is_pending(&COUNTDOWN_TICK.into()));

    // Stopping one timer leaves the other ticking
    runtime.enqueue(Action::Stopwatch(StopwatchAction::Stop { now: 10 }));
    runtime.step(&mut handle).await.expect("queue open");
    assert!(!runtime.tasks().is_pending(&STOPWATCH_TICK.into()));
    assert!(runtime.tasks().is_pending(&COUNTDOWN_TICK.into()));

    time.set(5000);
    let (action, _) = runtime.step(&mut handle).await.expect("queue open");
    assert_eq!(action, Action::Countdown(CountdownAction::Tick { now: 5000 }));
    assert_eq!(runtime.state().countdown.remaining(), Some(55_000));
}
