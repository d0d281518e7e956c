//! Eva command-line driver.
//!
//! `main.rs` only matches arguments; the command handlers and the pieces
//! they share live here so they can be tested without spawning a process.

pub mod commands;
mod logging;

pub use logging::init_tracing;
