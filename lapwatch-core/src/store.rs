//! Middleware hooks around store dispatch

use crate::Action;

/// Hooks run around every reducer call
///
/// Middleware observes; it cannot rewrite or drop actions.
pub trait Middleware<A: Action> {
    fn before(&mut self, action: &A);

    /// `state_changed` is the reducer's own verdict for this action.
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Default for stores built without middleware
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _: &A) {}

    fn after(&mut self, _: &A, _: bool) {}
}

/// Middleware that logs actions through `tracing`
///
/// Ticks arrive every few milliseconds while a clock runs; they are logged
/// at `trace` so a `debug` filter shows only user-driven actions.
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    pub log_before: bool,
    pub log_after: bool,
    /// Action names demoted to `trace`
    pub quiet: Vec<&'static str>,
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingMiddleware {
    /// Log after dispatch only, with `Tick` demoted to `trace`
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
            quiet: vec!["Tick"],
        }
    }

    /// Log both before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            ..Self::new()
        }
    }

    fn is_quiet(&self, name: &str) -> bool {
        self.quiet.contains(&name)
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if !self.log_before {
            return;
        }
        if self.is_quiet(action.name()) {
            tracing::trace!(action = %action.name(), "Dispatching");
        } else {
            tracing::debug!(action = %action.name(), "Dispatching");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if !self.log_after {
            return;
        }
        if self.is_quiet(action.name()) {
            tracing::trace!(action = %action.name(), state_changed, "Action processed");
        } else {
            tracing::debug!(?action, state_changed, "Action processed");
        }
    }
}
