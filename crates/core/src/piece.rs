//! Piece module - the falling tetromino
//!
//! A piece is four cells defined relative to a pivot. It does not own the
//! grid: every operation that reads or writes the field borrows it.
//!
//! All moves and rotations follow the same protocol:
//! 1. compute the candidate cells without touching any state,
//! 2. reject if any candidate is outside the grid,
//! 3. reject if any candidate is held by a different piece,
//! 4. otherwise remove the piece, transform it, and put it back.
//!
//! Cells held by the piece itself never count as a collision, so a piece can
//! always slide into its own footprint.

use arrayvec::ArrayVec;

use crate::grid::{Grid, PieceId, PieceRef};
use crate::rotation::RotationKind;
use crate::types::{Color, ShapeKind};

/// Number of cells in a well-formed piece
pub const PIECE_CELLS: usize = 4;

/// Offset of one cell from the piece's pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelativeCell {
    pub x: i32,
    pub y: i32,
}

impl RelativeCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn rotated(self, kind: RotationKind) -> Self {
        let (x, y) = kind.apply(self.x, self.y);
        Self { x, y }
    }
}

/// Absolute positions of a piece's cells
pub type Footprint = ArrayVec<(i32, i32), PIECE_CELLS>;

#[derive(Debug, Clone, Copy)]
enum Motion {
    Shift(i32, i32),
    Rotate(RotationKind),
}

const STAY: Motion = Motion::Shift(0, 0);
const LEFT: Motion = Motion::Shift(-1, 0);
const RIGHT: Motion = Motion::Shift(1, 0);
const DOWN: Motion = Motion::Shift(0, -1);

/// A movable group of cells around a pivot
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    kind: ShapeKind,
    x: i32,
    y: i32,
    cells: ArrayVec<RelativeCell, PIECE_CELLS>,
    left: RotationKind,
    right: RotationKind,
    color: Color,
}

impl Piece {
    /// Create a piece with no cells at pivot (x, y)
    ///
    /// The piece is off the grid until `put` or `to_field` is called.
    pub fn new(
        id: PieceId,
        kind: ShapeKind,
        x: i32,
        y: i32,
        left: RotationKind,
        right: RotationKind,
        color: Color,
    ) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            cells: ArrayVec::new(),
            left,
            right,
            color,
        }
    }

    /// Add a cell at the given offset
    ///
    /// Returns false if the offset is already part of the piece or the
    /// piece is already complete.
    pub fn add(&mut self, x_offset: i32, y_offset: i32) -> bool {
        let cell = RelativeCell::new(x_offset, y_offset);
        if self.cells.contains(&cell) {
            return false;
        }
        self.cells.try_push(cell).is_ok()
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pivot(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// The value this piece writes into grid cells
    pub fn reference(&self) -> PieceRef {
        PieceRef::new(self.id, self.color)
    }

    pub fn offsets(&self) -> &[RelativeCell] {
        &self.cells
    }

    /// Absolute positions of all cells
    pub fn cells(&self) -> Footprint {
        self.candidates(STAY)
    }

    fn candidates(&self, motion: Motion) -> Footprint {
        let (dx, dy) = match motion {
            Motion::Shift(dx, dy) => (dx, dy),
            Motion::Rotate(_) => (0, 0),
        };
        self.cells
            .iter()
            .map(|&cell| {
                let cell = match motion {
                    Motion::Rotate(kind) => cell.rotated(kind),
                    Motion::Shift(..) => cell,
                };
                (self.x + dx + cell.x, self.y + dy + cell.y)
            })
            .collect()
    }

    fn in_bounds_after(&self, grid: &Grid, motion: Motion) -> bool {
        self.candidates(motion)
            .iter()
            .all(|&(x, y)| grid.is_valid_cell(x, y))
    }

    fn collides_after(&self, grid: &Grid, motion: Motion) -> bool {
        self.candidates(motion)
            .iter()
            .any(|&(x, y)| matches!(grid.get(x, y), Some(other) if other.id != self.id))
    }

    fn can(&self, grid: &Grid, motion: Motion) -> bool {
        self.in_bounds_after(grid, motion) && !self.collides_after(grid, motion)
    }

    fn apply(&mut self, grid: &mut Grid, motion: Motion) -> bool {
        if !self.can(grid, motion) {
            return false;
        }

        self.remove(grid);
        match motion {
            Motion::Shift(dx, dy) => {
                self.x += dx;
                self.y += dy;
            }
            Motion::Rotate(kind) => {
                for cell in &mut self.cells {
                    *cell = cell.rotated(kind);
                }
            }
        }
        self.put(grid);
        true
    }

    /// Write the piece's cells to the grid without any checks
    pub fn put(&self, grid: &mut Grid) {
        let piece = self.reference();
        for (x, y) in self.cells() {
            grid.put(x, y, piece);
        }
    }

    /// Erase the piece's cells from the grid without any checks
    pub fn remove(&self, grid: &mut Grid) {
        for (x, y) in self.cells() {
            grid.remove(x, y);
        }
    }

    /// Place the piece if its current position is legal
    pub fn to_field(&self, grid: &mut Grid) -> bool {
        if !self.can(grid, STAY) {
            return false;
        }
        self.put(grid);
        true
    }

    pub fn move_left(&mut self, grid: &mut Grid) -> bool {
        self.apply(grid, LEFT)
    }

    pub fn move_right(&mut self, grid: &mut Grid) -> bool {
        self.apply(grid, RIGHT)
    }

    pub fn move_down(&mut self, grid: &mut Grid) -> bool {
        self.apply(grid, DOWN)
    }

    /// Drop the piece as far as it goes
    ///
    /// Removes and re-puts once regardless of the distance travelled.
    /// Returns true if it moved at least one row.
    pub fn fall_down(&mut self, grid: &mut Grid) -> bool {
        if !self.can_move_down(grid) {
            return false;
        }

        self.remove(grid);
        while self.can_move_down(grid) {
            self.y -= 1;
        }
        self.put(grid);
        true
    }

    pub fn rotate_left(&mut self, grid: &mut Grid) -> bool {
        self.apply(grid, Motion::Rotate(self.left))
    }

    pub fn rotate_right(&mut self, grid: &mut Grid) -> bool {
        self.apply(grid, Motion::Rotate(self.right))
    }

    pub fn can_move_left(&self, grid: &Grid) -> bool {
        self.can(grid, LEFT)
    }

    pub fn can_move_right(&self, grid: &Grid) -> bool {
        self.can(grid, RIGHT)
    }

    pub fn can_move_down(&self, grid: &Grid) -> bool {
        self.can(grid, DOWN)
    }

    pub fn can_rotate_left(&self, grid: &Grid) -> bool {
        self.can(grid, Motion::Rotate(self.left))
    }

    pub fn can_rotate_right(&self, grid: &Grid) -> bool {
        self.can(grid, Motion::Rotate(self.right))
    }

    /// Check whether the current position overlaps another piece
    ///
    /// Used on a freshly spawned piece to detect game over.
    pub fn has_collision(&self, grid: &Grid) -> bool {
        self.collides_after(grid, STAY)
    }

    /// Check whether every cell lies inside the grid
    pub fn in_bounds(&self, grid: &Grid) -> bool {
        self.in_bounds_after(grid, STAY)
    }
}
