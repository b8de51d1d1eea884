//! lapwatch - terminal stopwatch with laps
//!
//! 1. Key event -> AppView.handle_event() -> Actions (stamped with the time)
//! 2. Actions dispatched to the EffectStore
//! 3. Reducer updates state and returns effects
//! 4. Effects become tasks: one re-armed tick per running timer, quote fetches
//! 5. If state changed, re-render
//!
//! # Usage
//!
//! ```sh
//! lapwatch
//! lapwatch --mode countdown --countdown 5:00
//! lapwatch --tick-ms 100 --log-file lapwatch.log --log-level debug
//! ```

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use clap::Parser;
use lapwatch::action::Action;
use lapwatch::components::{AppView, AppViewProps, Component};
use lapwatch::config::Args;
use lapwatch::handler::EffectHandler;
use lapwatch::logging;
use lapwatch::reducer::reducer;
use lapwatch::state::{AppState, Mode};
use lapwatch::terminal;
use lapwatch_core::{
    EffectRuntime, EffectStore, EventKind, EventOutcome, LoggingMiddleware, MonotonicTime,
    PollerConfig, TimeSource,
};
use ratatui::{backend::Backend, Terminal};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref(), &args.log_level)?;

    let mut state = AppState::new(args.mode, args.quote_url.as_str());
    match args.initial_countdown() {
        Ok(Some(ms)) => {
            let input = args.countdown.as_deref().unwrap_or_default().trim();
            state = state.with_countdown(ms, input);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: invalid --countdown: {e}");
            eprintln!("Examples: '45', '2:30', '1:00:00'");
            std::process::exit(2);
        }
    }

    let mut terminal = terminal::setup()?;
    let result = run_app(
        &mut terminal,
        state,
        args.tick_interval(),
        args.poller_config(),
    )
    .await;
    terminal::restore();
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Exited with error");
    }
    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    state: AppState,
    tick_interval: Duration,
    poller: PollerConfig,
) -> io::Result<()> {
    let time = MonotonicTime::new();
    let handler = EffectHandler::new(time, tick_interval);
    let start_mode = state.mode;

    let store = EffectStore::with_middleware(state, reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store).with_event_poller(poller);

    if start_mode == Mode::Quote {
        runtime.enqueue(Action::QuoteFetch);
    }
    tracing::info!(?start_mode, tick_ms = tick_interval.as_millis() as u64, "Starting");

    let view = RefCell::new(AppView::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                let props = AppViewProps {
                    state,
                    now: time.now_ms(),
                };
                view.borrow_mut().render(frame, area, props);
            },
            |event, state| {
                if let EventKind::Resize(..) = event {
                    return EventOutcome::ignored().with_render();
                }
                let props = AppViewProps {
                    state,
                    now: time.now_ms(),
                };
                EventOutcome::from_actions(view.borrow_mut().handle_event(event, props))
            },
            |action| matches!(action, Action::Quit),
            |effect, ctx| handler.handle(effect, ctx),
        )
        .await
}
