//! Test utilities for lapwatch applications
//!
//! - [`key`]: build a `KeyEvent` from a string (`key("space")`, `key("ctrl+c")`)
//! - [`TestHarness`]: state + reducer with recorded effects
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - [`ActionAssertions`]: assertions over the actions a component returned
//!
//! ```ignore
//! use lapwatch_core::testing::*;
//!
//! let actions = screen.handle_event(&EventKind::Key(key("l")), props);
//! actions.assert_count(1);
//!
//! let mut render = RenderHarness::new(40, 12);
//! let output = render.render_to_string_plain(|frame| screen.render(frame, frame.area(), props));
//! assert!(output.contains("Lap 1"));
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::effect::{DispatchResult, EffectReducer};
use crate::Action;

/// Parse `"l"`, `"space"` or `"ctrl+c"` into a key press.
///
/// Accepts a single character or a named key (`space`, `enter`, `esc`,
/// `tab`, `backspace`, `up`, `down`, `left`, `right`), optionally prefixed
/// with `ctrl+`, `alt+` or `shift+`.
///
/// # Panics
///
/// On anything that is neither a named key nor a single character.
pub fn key(s: &str) -> KeyEvent {
    let mut modifiers = KeyModifiers::empty();
    let mut rest = s;
    loop {
        if let Some(r) = rest.strip_prefix("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("alt+") {
            modifiers |= KeyModifiers::ALT;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            rest = r;
        } else {
            break;
        }
    }

    let code = match rest {
        "space" => KeyCode::Char(' '),
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => panic!("Invalid key string: {s:?}"),
            }
        }
    };

    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// A plain press of `c`.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Drives a reducer directly and records what it asked for.
///
/// Effects returned by [`dispatch`](Self::dispatch) are kept until
/// [`drain_effects`](Self::drain_effects), so a test can follow a whole
/// sequence of key presses and check the effects at the end.
pub struct TestHarness<S, A: Action, E> {
    pub state: S,
    reducer: EffectReducer<S, A, E>,
    effects: Vec<E>,
}

impl<S, A: Action, E> TestHarness<S, A, E> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            effects: Vec::new(),
        }
    }

    /// Run the reducer and return whether the state changed.
    pub fn dispatch(&mut self, action: A) -> bool {
        let DispatchResult { changed, effects } = (self.reducer)(&mut self.state, action);
        self.effects.extend(effects);
        changed
    }

    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    pub fn drain_effects(&mut self) -> Vec<E> {
        std::mem::take(&mut self.effects)
    }
}

/// Renders into a [`TestBackend`] for assertions on screen contents.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("test backend terminal");
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render<F>(&mut self, render: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).expect("draw to test backend");
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, one line per row, styles dropped.
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(render))
    }
}

/// Buffer text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Assertions over a list of actions returned by a component.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
    fn assert_contains(&self, expected: A);
}

impl<A, T> ActionAssertions<A> for T
where
    A: PartialEq + Debug,
    T: AsRef<[A]>,
{
    fn assert_empty(&self) {
        let actions = self.as_ref();
        assert!(actions.is_empty(), "Expected no actions, got {actions:?}");
    }

    fn assert_count(&self, n: usize) {
        let actions = self.as_ref();
        assert_eq!(
            actions.len(),
            n,
            "Expected {n} actions, got {}: {actions:?}",
            actions.len()
        );
    }

    fn assert_first(&self, expected: A) {
        let actions = self.as_ref();
        assert_eq!(
            actions.first(),
            Some(&expected),
            "Unexpected first action in {actions:?}"
        );
    }

    fn assert_contains(&self, expected: A) {
        let actions = self.as_ref();
        assert!(
            actions.contains(&expected),
            "Expected {expected:?} in {actions:?}"
        );
    }
}

/// Assert that an action matching a pattern is in the list.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern is in the list.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}
