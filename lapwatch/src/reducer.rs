//! Reducer - (state, action) -> effects
//!
//! Timer actions go straight to the core state machines and their tick
//! effects are tagged with the timer they belong to. Everything else is UI
//! bookkeeping for the duration field and the quote screen.

use std::collections::BTreeMap;

use lapwatch_core::{parse_duration, reduce_countdown, reduce_stopwatch, CountdownAction, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Mode};
use crate::validation::{FormRules, DURATION_FIELD};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Timers =====
        Action::Stopwatch(action) => {
            reduce_stopwatch(&mut state.stopwatch, action).map(Effect::StopwatchTick)
        }
        Action::Countdown(action) => {
            reduce_countdown(&mut state.countdown, action).map(Effect::CountdownTick)
        }

        // ===== Duration field =====
        Action::DurationInput(c) => {
            if state.countdown.is_running() || !(c.is_ascii_digit() || c == ':') {
                return DispatchResult::unchanged();
            }
            state.duration_input.value.push(c);
            state.duration_input.errors.clear();
            DispatchResult::changed()
        }
        Action::DurationBackspace => {
            if state.countdown.is_running() || state.duration_input.value.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.duration_input.errors.clear();
            DispatchResult::changed()
        }
        Action::DurationSubmit => submit_duration(state),

        // ===== Quote =====
        Action::QuoteFetch => fetch_quote(state),
        Action::QuoteDidLoad(quote) => {
            state.quote.quote = Some(quote);
            state.quote.is_loading = false;
            state.quote.error = None;
            DispatchResult::changed()
        }
        Action::QuoteDidError(message) => {
            state.quote.is_loading = false;
            state.quote.error = Some(message);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiNextMode => {
            state.mode = state.mode.next();
            if state.mode == Mode::Quote && state.quote.quote.is_none() {
                return fetch_quote(state).mark_changed();
            }
            DispatchResult::changed()
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn fetch_quote(state: &mut AppState) -> DispatchResult<Effect> {
    if state.quote.is_loading {
        return DispatchResult::unchanged();
    }
    state.quote.is_loading = true;
    state.quote.error = None;
    DispatchResult::changed_with(Effect::FetchQuote {
        url: state.quote_url.clone(),
    })
}

fn submit_duration(state: &mut AppState) -> DispatchResult<Effect> {
    let input = &mut state.duration_input;
    let fields = BTreeMap::from([(DURATION_FIELD, input.value.as_str())]);
    let mut errors = FormRules::countdown().validate(&fields);

    if errors.is_empty() {
        match parse_duration(&input.value) {
            Ok(ms) => {
                input.errors.clear();
                return reduce_countdown(&mut state.countdown, CountdownAction::SetDuration(ms))
                    .map(Effect::CountdownTick)
                    .mark_changed();
            }
            Err(err) => {
                errors.insert(DURATION_FIELD.to_string(), err.to_string());
            }
        }
    }

    tracing::debug!(?errors, "Rejected countdown duration");
    if input.errors == errors {
        return DispatchResult::unchanged();
    }
    input.errors = errors;
    DispatchResult::changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Quote;
    use lapwatch_core::{StopwatchAction, TimerEffect};

    fn type_duration(state: &mut AppState, text: &str) {
        for c in text.chars() {
            reducer(state, Action::DurationInput(c));
        }
    }

    #[test]
    fn test_stopwatch_effects_are_tagged() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Stopwatch(StopwatchAction::Start { now: 0 }));
        assert!(result.changed);
        assert_eq!(
            result.effects,
            vec![Effect::StopwatchTick(TimerEffect::ScheduleTick)]
        );

        let result = reducer(&mut state, Action::Stopwatch(StopwatchAction::Stop { now: 50 }));
        assert_eq!(
            result.effects,
            vec![Effect::StopwatchTick(TimerEffect::CancelTick)]
        );
    }

    #[test]
    fn test_duration_submit_sets_countdown() {
        let mut state = AppState::default();
        type_duration(&mut state, "1:30");
        let result = reducer(&mut state, Action::DurationSubmit);

        assert!(result.changed);
        assert!(state.duration_input.errors.is_empty());
        assert_eq!(state.countdown.duration_ms, Some(90_000));
    }

    #[test]
    fn test_duration_input_filters_characters() {
        let mut state = AppState::default();
        type_duration(&mut state, "1a:3 0");
        assert_eq!(state.duration_input.value, "1:30");

        reducer(&mut state, Action::DurationBackspace);
        assert_eq!(state.duration_input.value, "1:3");
    }

    #[test]
    fn test_empty_duration_is_rejected() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::DurationSubmit);

        assert!(result.changed);
        assert_eq!(
            state.duration_input.errors.get(DURATION_FIELD).map(String::as_str),
            Some("Duration is required")
        );
        assert_eq!(state.countdown.duration_ms, None);

        // Same error again is not a change
        let result = reducer(&mut state, Action::DurationSubmit);
        assert!(!result.changed);
    }

    #[test]
    fn test_out_of_range_duration_is_rejected() {
        let mut state = AppState::default();
        type_duration(&mut state, "1:75");
        reducer(&mut state, Action::DurationSubmit);

        assert!(state.duration_input.errors.contains_key(DURATION_FIELD));
        assert_eq!(state.countdown.duration_ms, None);

        // Editing clears the error
        reducer(&mut state, Action::DurationBackspace);
        assert!(state.duration_input.errors.is_empty());
    }

    #[test]
    fn test_duration_locked_while_running() {
        let mut state = AppState::default().with_countdown(10_000, "10");
        reducer(&mut state, Action::Countdown(CountdownAction::Start { now: 0 }));

        let result = reducer(&mut state, Action::DurationInput('5'));
        assert!(!result.changed);
        assert_eq!(state.duration_input.value, "10");
    }

    #[test]
    fn test_quote_fetch_lifecycle() {
        let mut state = AppState::new(Mode::Quote, "http://localhost/quotes");

        let result = reducer(&mut state, Action::QuoteFetch);
        assert_eq!(
            result.effects,
            vec![Effect::FetchQuote {
                url: "http://localhost/quotes".into()
            }]
        );
        assert!(state.quote.is_loading);

        // No second request while one is in flight
        let result = reducer(&mut state, Action::QuoteFetch);
        assert!(!result.has_effects());

        reducer(&mut state, Action::QuoteDidError("timeout".into()));
        assert!(!state.quote.is_loading);
        assert_eq!(state.quote.error.as_deref(), Some("timeout"));

        reducer(&mut state, Action::QuoteFetch);
        let quote = Quote {
            text: "Stay hungry".into(),
            author: Some("Steve Jobs".into()),
        };
        reducer(&mut state, Action::QuoteDidLoad(quote.clone()));
        assert_eq!(state.quote.quote, Some(quote));
        assert_eq!(state.quote.error, None);
    }

    #[test]
    fn test_entering_quote_mode_fetches_once() {
        let mut state = AppState::new(Mode::Countdown, "http://localhost/quotes");
        let result = reducer(&mut state, Action::UiNextMode);
        assert_eq!(state.mode, Mode::Quote);
        assert!(result.has_effects());

        reducer(
            &mut state,
            Action::QuoteDidLoad(Quote {
                text: "Cached".into(),
                author: None,
            }),
        );
        reducer(&mut state, Action::UiNextMode);
        reducer(&mut state, Action::UiNextMode);
        let result = reducer(&mut state, Action::UiNextMode);
        assert_eq!(state.mode, Mode::Quote);
        assert!(result.changed);
        assert!(!result.has_effects());
    }
}
