//! Terminal renderer for the playing field.
//!
//! The core reports every changed cell by coordinate; this crate turns one
//! coordinate into one small terminal write. Full redraws only happen on
//! start-up and resize.
//!
//! - [`board_view`]: pure geometry and styling, unit-testable
//! - [`renderer`]: crossterm output

pub mod board_view;
pub mod renderer;

pub use tetris_field_core as core;
pub use tetris_field_types as types;

pub use board_view::{BoardView, CellLook, Viewport};
pub use renderer::{encode_cell_into, encode_frame_into, TerminalRenderer};
