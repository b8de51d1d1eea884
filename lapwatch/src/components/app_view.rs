//! Root view: mode tabs, the active screen and its key hints

use crossterm::event::{KeyCode, KeyModifiers};
use lapwatch_core::EventKind;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::{
    countdown_screen, quote_screen, stopwatch_screen, Component, CountdownScreen,
    CountdownScreenProps, HelpBar, HelpBarProps, QuoteScreen, QuoteScreenProps, StopwatchScreen,
    StopwatchScreenProps,
};
use crate::action::Action;
use crate::state::{AppState, Mode};

const GLOBAL_HINTS: &[(&str, &str)] = &[("tab", "switch"), ("q", "quit")];
const MODES: [Mode; 3] = [Mode::Stopwatch, Mode::Countdown, Mode::Quote];

pub struct AppViewProps<'a> {
    pub state: &'a AppState,
    pub now: u64,
}

#[derive(Default)]
pub struct AppView {
    stopwatch: StopwatchScreen,
    countdown: CountdownScreen,
    quote: QuoteScreen,
}

impl AppView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for AppView {
    type Props<'a> = AppViewProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p:,
    {
        if let EventKind::Key(key) = event {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Char('c') if ctrl => return vec![Action::Quit],
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Tab => return vec![Action::UiNextMode],
                _ => {}
            }
        }

        let AppViewProps { state, now } = props;
        match state.mode {
            Mode::Stopwatch => self.stopwatch.handle_event(
                event,
                StopwatchScreenProps {
                    state: &state.stopwatch,
                    now,
                },
            ),
            Mode::Countdown => self
                .countdown
                .handle_event(event, CountdownScreenProps { state, now }),
            Mode::Quote => self.quote.handle_event(
                event,
                QuoteScreenProps {
                    state: &state.quote,
                },
            ),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let AppViewProps { state, now } = props;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" lapwatch ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Tabs
            Constraint::Length(1),
            Constraint::Min(1), // Screen
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let selected = MODES.iter().position(|m| *m == state.mode).unwrap_or(0);
        let tabs = Tabs::new(MODES.iter().map(|m| m.title()))
            .select(selected)
            .highlight_style(Style::default().fg(Color::Cyan).bold());
        frame.render_widget(tabs, chunks[0]);

        let screen_hints = match state.mode {
            Mode::Stopwatch => {
                let props = StopwatchScreenProps {
                    state: &state.stopwatch,
                    now,
                };
                self.stopwatch.render(frame, chunks[2], props);
                stopwatch_screen::HINTS
            }
            Mode::Countdown => {
                self.countdown
                    .render(frame, chunks[2], CountdownScreenProps { state, now });
                countdown_screen::HINTS
            }
            Mode::Quote => {
                let props = QuoteScreenProps {
                    state: &state.quote,
                };
                self.quote.render(frame, chunks[2], props);
                quote_screen::HINTS
            }
        };

        let hints: Vec<(&str, &str)> = screen_hints
            .iter()
            .chain(GLOBAL_HINTS)
            .copied()
            .collect();
        HelpBar.render(frame, chunks[3], HelpBarProps { hints: &hints });
    }
}
