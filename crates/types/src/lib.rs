//! Shared types - plain data used by the core, the input layer and the renderer
//!
//! Everything here is pure data with no behaviour beyond parsing and lookup,
//! so it can be used from any crate in the workspace without pulling in the
//! game rules.
//!
//! # Field Dimensions
//!
//! The playing field is configurable per session. The defaults are:
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, bottom to top)
//! - **Spawn position**: `(columns / 2, rows - 2)`
//! - **Limit**: 1000 x 1000 (`MAX_COLUMNS`, `MAX_ROWS`)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_PERIOD_MS` | 1000 | Interval of the drop timer |
//!
//! # Examples
//!
//! ```
//! use tetris_field_types::{Command, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! assert_eq!(Command::FallDown.as_str(), "fallDown");
//! assert!(!Command::Start.is_piece_command());
//!
//! assert_eq!(DEFAULT_COLUMNS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

/// Default field width in cells
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default field height in cells
pub const DEFAULT_ROWS: u16 = 20;

/// Largest accepted field width
pub const MAX_COLUMNS: u16 = 1000;

/// Largest accepted field height
pub const MAX_ROWS: u16 = 1000;

/// Drop timer period in milliseconds (one row per second)
pub const DROP_PERIOD_MS: u64 = 1000;

/// Symbol for an occupied cell in the textual dump
pub const OCCUPIED_SYMBOL: char = 'X';

/// Symbol for an empty cell in the textual dump
pub const EMPTY_SYMBOL: char = '.';

/// The seven piece shapes
///
/// Each shape has a fixed geometry and color, see the shape catalog in the core crate:
/// - **I**: Cyan, four in a line
/// - **J**: Yellow, mirror of L
/// - **L**: Magenta
/// - **O**: Blue, 2x2 square (does not rotate)
/// - **S**: Orange, mirror of Z
/// - **T**: Green
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All shapes, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Display color of a piece
///
/// The core only carries the name; mapping to pixels or terminal colors is
/// the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Magenta,
    Blue,
    Orange,
    Green,
    Red,
}

impl Color {
    /// Truecolor value used by the terminal renderer
    pub fn rgb(&self) -> Rgb {
        match self {
            Color::Cyan => Rgb::new(80, 220, 220),
            Color::Yellow => Rgb::new(240, 220, 80),
            Color::Magenta => Rgb::new(200, 120, 220),
            Color::Blue => Rgb::new(80, 120, 220),
            Color::Orange => Rgb::new(255, 165, 0),
            Color::Green => Rgb::new(100, 220, 120),
            Color::Red => Rgb::new(220, 80, 80),
        }
    }
}

/// Commands accepted by a session
///
/// Produced by the input layer and dispatched through `Session::apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the piece one cell left
    MoveLeft,
    /// Move the piece one cell right
    MoveRight,
    /// Apply the piece's left rotation
    RotateLeft,
    /// Apply the piece's right rotation
    RotateRight,
    /// Drop the piece as far as it can go
    FallDown,
    /// (Re)start the game
    Start,
}

impl Command {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateLeft => "rotateLeft",
            Command::RotateRight => "rotateRight",
            Command::FallDown => "fallDown",
            Command::Start => "start",
        }
    }

    /// Whether the command is forwarded to the active piece
    pub fn is_piece_command(&self) -> bool {
        !matches!(self, Command::Start)
    }
}
