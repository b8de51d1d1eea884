//! Stopwatch screen: running time, status and the lap table

use crossterm::event::KeyCode;
use lapwatch_core::{format_clock, EventKind, LapMark, StopwatchAction, StopwatchState};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::Component;
use crate::action::Action;

pub const HINTS: &[(&str, &str)] = &[
    ("space", "start/stop"),
    ("l", "lap"),
    ("r", "reset"),
    ("enter", "lap/reset"),
];

pub struct StopwatchScreenProps<'a> {
    pub state: &'a StopwatchState,
    /// Time reading attached to the actions this screen emits
    pub now: u64,
}

#[derive(Default)]
pub struct StopwatchScreen;

impl Component<Action> for StopwatchScreen {
    type Props<'a> = StopwatchScreenProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p:,
    {
        let now = props.now;
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let action = match key.code {
            KeyCode::Char(' ') | KeyCode::Char('s') => StopwatchAction::Toggle { now },
            KeyCode::Char('l') => StopwatchAction::Lap { now },
            KeyCode::Char('r') => StopwatchAction::Reset,
            KeyCode::Enter => StopwatchAction::LapOrReset { now },
            _ => return vec![],
        };
        vec![Action::Stopwatch(action)]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(3), // Time
            Constraint::Length(1), // Status
            Constraint::Min(0),    // Laps
        ])
        .split(area);

        let time = Paragraph::new(format_clock(state.elapsed()))
            .style(Style::default().fg(Color::White).bold())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(time, chunks[0]);

        let status = if state.is_running() {
            Line::from("running").fg(Color::Green)
        } else if state.elapsed() > 0 {
            Line::from("paused").fg(Color::Yellow)
        } else {
            Line::from("ready").fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(status.centered()), chunks[1]);

        let rows: Vec<Row> = state
            .lap_rows()
            .into_iter()
            .map(|row| {
                let style = match row.mark {
                    LapMark::Fastest => Style::default().fg(Color::Green),
                    LapMark::Slowest => Style::default().fg(Color::Red),
                    LapMark::None if row.provisional => Style::default().fg(Color::Gray).italic(),
                    LapMark::None => Style::default(),
                };
                Row::new(vec![
                    Cell::from(format!("Lap {}", row.number)),
                    Cell::from(format_clock(row.duration_ms)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(10), Constraint::Length(10)])
            .column_spacing(2)
            .flex(Flex::Center);
        frame.render_widget(table, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapwatch_core::reduce_stopwatch;
    use lapwatch_core::testing::*;

    fn props(state: &StopwatchState) -> StopwatchScreenProps<'_> {
        StopwatchScreenProps { state, now: 1234 }
    }

    #[test]
    fn test_keys_carry_time() {
        let mut screen = StopwatchScreen;
        let state = StopwatchState::new();

        let actions = screen.handle_event(&EventKind::Key(key("space")), props(&state));
        actions.assert_first(Action::Stopwatch(StopwatchAction::Toggle { now: 1234 }));

        let actions = screen.handle_event(&EventKind::Key(key("l")), props(&state));
        actions.assert_first(Action::Stopwatch(StopwatchAction::Lap { now: 1234 }));

        let actions = screen.handle_event(&EventKind::Key(key("enter")), props(&state));
        actions.assert_first(Action::Stopwatch(StopwatchAction::LapOrReset { now: 1234 }));

        let actions = screen.handle_event(&EventKind::Key(key("x")), props(&state));
        actions.assert_empty();
    }

    #[test]
    fn test_render_laps_newest_first() {
        let mut state = StopwatchState::new();
        for action in [
            StopwatchAction::Start { now: 0 },
            StopwatchAction::Lap { now: 1000 },
            StopwatchAction::Lap { now: 1500 },
            StopwatchAction::Stop { now: 1750 },
        ] {
            reduce_stopwatch(&mut state, action);
        }

        let mut render = RenderHarness::new(40, 10);
        let output = render.render_to_string_plain(|frame| {
            StopwatchScreen.render(frame, frame.area(), props(&state));
        });

        assert!(output.contains("00:01.75"));
        assert!(output.contains("paused"));
        let lap3 = output.find("Lap 3").expect("provisional lap");
        let lap2 = output.find("Lap 2").expect("lap 2");
        let lap1 = output.find("Lap 1").expect("lap 1");
        assert!(lap3 < lap2 && lap2 < lap1);
        assert!(output.contains("00:00.50"));
    }
}
