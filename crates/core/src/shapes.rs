//! Shape catalog - the seven piece geometries as data
//!
//! Every shape is one record: four offsets from the pivot, a color, and the
//! rotation kinds used for "rotate left" and "rotate right". Building a
//! piece from a record is the only shape-specific code there is.

use crate::grid::PieceId;
use crate::piece::{Piece, PIECE_CELLS};
use crate::rotation::RotationKind;
use crate::types::{Color, ShapeKind};

use RotationKind::{Identity, Rotate270, Rotate90};

/// Geometry and color of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub offsets: [(i32, i32); PIECE_CELLS],
    pub left: RotationKind,
    pub right: RotationKind,
    pub color: Color,
}

impl ShapeSpec {
    /// Build an off-grid piece with its pivot at (x, y)
    pub fn build(&self, id: PieceId, x: i32, y: i32) -> Piece {
        let mut piece = Piece::new(id, self.kind, x, y, self.left, self.right, self.color);
        for &(dx, dy) in &self.offsets {
            let added = piece.add(dx, dy);
            debug_assert!(added, "duplicate offset in {:?}", self.kind);
        }
        piece
    }
}

/// All shapes, in `ShapeKind::ALL` order
pub const CATALOG: [ShapeSpec; 7] = [
    ShapeSpec {
        kind: ShapeKind::I,
        offsets: [(0, 0), (0, 1), (0, -1), (0, 2)],
        left: Rotate270,
        right: Rotate90,
        color: Color::Cyan,
    },
    ShapeSpec {
        kind: ShapeKind::J,
        offsets: [(0, 0), (0, 1), (0, -1), (-1, -1)],
        left: Rotate270,
        right: Rotate90,
        color: Color::Yellow,
    },
    ShapeSpec {
        kind: ShapeKind::L,
        offsets: [(0, 0), (0, 1), (0, -1), (1, -1)],
        left: Rotate270,
        right: Rotate90,
        color: Color::Magenta,
    },
    ShapeSpec {
        kind: ShapeKind::O,
        offsets: [(0, 0), (1, 0), (0, 1), (1, 1)],
        left: Identity,
        right: Identity,
        color: Color::Blue,
    },
    ShapeSpec {
        kind: ShapeKind::S,
        offsets: [(0, 0), (-1, 0), (0, 1), (1, 1)],
        left: Rotate270,
        right: Rotate90,
        color: Color::Orange,
    },
    ShapeSpec {
        kind: ShapeKind::T,
        offsets: [(0, 0), (-1, 0), (1, 0), (0, 1)],
        left: Rotate270,
        right: Rotate90,
        color: Color::Green,
    },
    ShapeSpec {
        kind: ShapeKind::Z,
        offsets: [(0, 0), (1, 0), (0, 1), (-1, 1)],
        left: Rotate270,
        right: Rotate90,
        color: Color::Red,
    },
];

/// Look up the record for a shape
pub fn shape(kind: ShapeKind) -> &'static ShapeSpec {
    match kind {
        ShapeKind::I => &CATALOG[0],
        ShapeKind::J => &CATALOG[1],
        ShapeKind::L => &CATALOG[2],
        ShapeKind::O => &CATALOG[3],
        ShapeKind::S => &CATALOG[4],
        ShapeKind::T => &CATALOG[5],
        ShapeKind::Z => &CATALOG[6],
    }
}
