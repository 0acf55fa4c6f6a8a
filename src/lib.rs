//! Tetris field (workspace facade crate).
//!
//! Re-exports `tetris_field::{core,input,term,types}` so binaries, tests and
//! benches depend on one package while the implementation lives in dedicated
//! crates under `crates/`.

pub use tetris_field_core as core;
pub use tetris_field_input as input;
pub use tetris_field_term as term;
pub use tetris_field_types as types;
