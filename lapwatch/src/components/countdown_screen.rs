//! Countdown screen: remaining time, progress gauge and the duration field

use crossterm::event::KeyCode;
use lapwatch_core::{format_hms_ceil, CountdownAction, EventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::{AppState, DurationInput};
use crate::validation::DURATION_FIELD;

pub const HINTS: &[(&str, &str)] = &[
    ("0-9 :", "duration"),
    ("enter", "set"),
    ("space", "start/stop"),
    ("r", "reset"),
];

pub struct CountdownScreenProps<'a> {
    pub state: &'a AppState,
    pub now: u64,
}

#[derive(Default)]
pub struct CountdownScreen;

impl Component<Action> for CountdownScreen {
    type Props<'a> = CountdownScreenProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p:,
    {
        let now = props.now;
        let EventKind::Key(key) = event else {
            return vec![];
        };
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => vec![Action::DurationInput(c)],
            KeyCode::Backspace => vec![Action::DurationBackspace],
            KeyCode::Enter => vec![Action::DurationSubmit],
            KeyCode::Char(' ') => vec![Action::Countdown(CountdownAction::Toggle { now })],
            KeyCode::Char('r') => vec![Action::Countdown(CountdownAction::Reset)],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let countdown = &props.state.countdown;
        let chunks = Layout::vertical([
            Constraint::Length(2), // Remaining
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Status
            Constraint::Length(3), // Duration field
            Constraint::Min(0),
        ])
        .split(area);

        let remaining = match countdown.remaining() {
            Some(ms) => format_hms_ceil(ms),
            None => "--:--:--".to_string(),
        };
        frame.render_widget(
            Paragraph::new(remaining)
                .style(Style::default().fg(Color::White).bold())
                .alignment(Alignment::Center),
            chunks[0],
        );

        let gauge_color = if countdown.expired {
            Color::Red
        } else {
            Color::Cyan
        };
        frame.render_widget(
            Gauge::default()
                .ratio(countdown.progress())
                .label("")
                .gauge_style(Style::default().fg(gauge_color)),
            chunks[1],
        );

        let status = if countdown.expired {
            Line::from("Time's up!").fg(Color::Red).bold()
        } else if countdown.duration_ms.is_none() {
            Line::from("Set a duration").fg(Color::DarkGray)
        } else if countdown.is_running() {
            Line::from("running").fg(Color::Green)
        } else {
            Line::from("paused").fg(Color::Yellow)
        };
        frame.render_widget(Paragraph::new(status.centered()), chunks[2]);

        render_input(frame, chunks[3], &props.state.duration_input, countdown.is_running());
    }
}

fn render_input(frame: &mut Frame, area: Rect, input: &DurationInput, locked: bool) {
    let error = input.errors.get(DURATION_FIELD);
    let border = if error.is_some() {
        Color::Red
    } else if locked {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let mut spans = vec![Span::raw(input.value.as_str())];
    if !locked {
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Duration ");
    let block = match error {
        Some(message) => block.title_bottom(Line::from(format!(" {message} ")).fg(Color::Red)),
        None => block,
    };
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer;
    use lapwatch_core::testing::*;

    #[test]
    fn test_digits_go_to_the_field() {
        let mut screen = CountdownScreen;
        let state = AppState::default();
        let props = || CountdownScreenProps {
            state: &state,
            now: 500,
        };

        screen
            .handle_event(&EventKind::Key(key("7")), props())
            .assert_first(Action::DurationInput('7'));
        screen
            .handle_event(&EventKind::Key(key(":")), props())
            .assert_first(Action::DurationInput(':'));
        screen
            .handle_event(&EventKind::Key(key("space")), props())
            .assert_first(Action::Countdown(CountdownAction::Toggle { now: 500 }));
        screen
            .handle_event(&EventKind::Key(key("enter")), props())
            .assert_first(Action::DurationSubmit);
    }

    #[test]
    fn test_render_validation_error() {
        let mut state = AppState::default();
        for c in "1:99".chars() {
            reducer(&mut state, Action::DurationInput(c));
        }
        reducer(&mut state, Action::DurationSubmit);

        let mut render = RenderHarness::new(50, 10);
        let output = render.render_to_string_plain(|frame| {
            CountdownScreen.render(frame, frame.area(), CountdownScreenProps { state: &state, now: 0 });
        });

        assert!(output.contains("Set a duration"));
        assert!(output.contains("1:99"));
        assert!(output.contains("seconds"), "error shown: {output}");
    }

    #[test]
    fn test_render_expired() {
        let mut state = AppState::default().with_countdown(1000, "1");
        reducer(&mut state, Action::Countdown(CountdownAction::Start { now: 0 }));
        reducer(&mut state, Action::Countdown(CountdownAction::Tick { now: 1000 }));

        let mut render = RenderHarness::new(50, 10);
        let output = render.render_to_string_plain(|frame| {
            CountdownScreen.render(frame, frame.area(), CountdownScreenProps { state: &state, now: 0 });
        });

        assert!(output.contains("00:00:00"));
        assert!(output.contains("Time's up!"));
    }
}
