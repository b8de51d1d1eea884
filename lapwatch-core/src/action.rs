//! The bound every dispatched action satisfies

use std::fmt::Debug;

/// Something a reducer understands.
///
/// Ticks are produced by tokio tasks, hence `Send + 'static`. `Debug` and
/// [`name`](Action::name) feed the logging middleware, which prints the full
/// action for user input but only the name for high-frequency ticks.
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name, e.g. `"Lap"`.
    fn name(&self) -> &'static str;
}
