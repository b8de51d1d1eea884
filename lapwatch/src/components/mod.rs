pub mod app_view;
pub mod countdown_screen;
pub mod help_bar;
pub mod quote_screen;
pub mod stopwatch_screen;

pub use lapwatch_core::Component;

pub use app_view::{AppView, AppViewProps};
pub use countdown_screen::{CountdownScreen, CountdownScreenProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use quote_screen::{QuoteScreen, QuoteScreenProps};
pub use stopwatch_screen::{StopwatchScreen, StopwatchScreenProps};
