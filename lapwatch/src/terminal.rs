//! Raw-mode terminal setup and teardown

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen. If anything after raw mode fails the
/// terminal is restored before the error is returned.
pub fn setup() -> io::Result<Tui> {
    enable_raw_mode()?;
    or_rollback(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        restore,
    )
}

/// Best effort: leave the alternate screen and raw mode.
pub fn restore() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Run `step`; on error run `rollback` first.
fn or_rollback<T>(
    step: impl FnOnce() -> io::Result<T>,
    rollback: impl FnOnce(),
) -> io::Result<T> {
    step().map_err(|err| {
        rollback();
        err
    })
}
