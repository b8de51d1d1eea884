//! lapwatch - terminal stopwatch, countdown and quote screens
//!
//! Library half of the `lapwatch` binary, exposed so screens and the
//! reducer can be tested without a terminal.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod handler;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod terminal;
pub mod validation;
