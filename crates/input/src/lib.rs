//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. There is no
//! key repeat logic: one key press is one command.

pub mod map;

pub use tetris_field_types as types;

pub use map::{command_for_key, should_quit};
