//! Quote screen

use crossterm::event::KeyCode;
use lapwatch_core::EventKind;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Stylize},
    text::{Line, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::QuoteState;

pub const HINTS: &[(&str, &str)] = &[("n", "new quote")];

pub const LOADING_TEXT: &str = "Loading quote...";
pub const ERROR_TEXT: &str = "Failed to load quote";

pub struct QuoteScreenProps<'a> {
    pub state: &'a QuoteState,
}

#[derive(Default)]
pub struct QuoteScreen;

impl Component<Action> for QuoteScreen {
    type Props<'a> = QuoteScreenProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, _props: Self::Props<'p>) -> Vec<Action>
    where
        'p:,
    {
        match event {
            EventKind::Key(key) if key.code == KeyCode::Char('n') => vec![Action::QuoteFetch],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let text = if state.is_loading {
            Text::from(Line::from(LOADING_TEXT).fg(Color::DarkGray))
        } else if state.error.is_some() {
            Text::from(vec![
                Line::from(ERROR_TEXT).fg(Color::Red).bold(),
                Line::from("press n to try again").fg(Color::DarkGray),
            ])
        } else if let Some(quote) = &state.quote {
            let author = quote.author.as_deref().unwrap_or("Unknown");
            Text::from(vec![
                Line::from(format!("\u{201c}{}\u{201d}", quote.text)).italic(),
                Line::default(),
                Line::from(format!("- {author}")).fg(Color::Cyan),
            ])
        } else {
            Text::from(Line::from("No quote yet").fg(Color::DarkGray))
        };

        let height = (text.height() as u16 + 2).min(area.height);
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(
            Paragraph::new(text)
                .centered()
                .wrap(Wrap { trim: true }),
            centered,
        );
    }
}
