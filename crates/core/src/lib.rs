//! Core game logic - the playing field state machine
//!
//! This crate contains the game rules and nothing else: no terminal, no
//! key handling. Renderers learn about changes through a per-cell
//! notification, input layers drive it through [`Session`] commands.
//!
//! # Module Structure
//!
//! - [`grid`]: bounded cell store with row removal and gravity shift
//! - [`piece`]: a four-cell piece with move/rotate/fall against a borrowed grid
//! - [`rotation`]: the four rotation kinds as offset transforms
//! - [`shapes`]: the seven shapes as a data table
//! - [`rng`]: uniform random shape selection
//! - [`config`]: session configuration and validation
//! - [`session`]: the live game: lock, drop timer, turn sequence
//!
//! # Game Rules
//!
//! - Pieces spawn at a fixed point, `(columns / 2, rows - 2)` by default
//! - A drop timer moves the active piece down once per period
//! - A piece that cannot move down has landed; full rows are removed and
//!   everything above falls by one row per removed row
//! - The game ends when a freshly spawned piece overlaps the field
//!
//! # Example
//!
//! ```
//! use tetris_field_core::{Session, SessionConfig, TickOutcome};
//!
//! let session = Session::new(SessionConfig::new(10, 20).with_seed(12345)).unwrap();
//! session.start();
//!
//! session.move_left();
//! session.rotate_right();
//! session.fall_down();
//!
//! // The landed piece gets replaced on the next tick.
//! assert!(matches!(session.tick(), TickOutcome::Spawned { .. }));
//! assert_eq!(session.render().lines().count(), 20);
//! session.clear();
//! ```

pub mod config;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod session;
pub mod shapes;

pub use tetris_field_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, SessionConfig};
pub use grid::{Cell, CellObserver, Grid, PieceId, PieceRef};
pub use piece::{Footprint, Piece, RelativeCell, PIECE_CELLS};
pub use rng::ShapePicker;
pub use rotation::RotationKind;
pub use session::{Session, SessionStatus, TickOutcome};
pub use shapes::{shape, ShapeSpec, CATALOG};
