//! Grid module - the playing field
//!
//! The grid is a `columns x rows` field where each cell is either empty or
//! holds a reference to the piece occupying it.
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: (column, row) where column grows left to right and row grows
//! bottom to top, so row 0 is the floor.
//!
//! Out-of-range coordinates are never an error: reads return `None` and
//! writes are ignored.

use std::fmt;

use crate::types::{Color, EMPTY_SYMBOL, OCCUPIED_SYMBOL};

/// Identity of a piece within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// What a grid cell stores: which piece sits there and how to draw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub id: PieceId,
    pub color: Color,
}

impl PieceRef {
    pub fn new(id: PieceId, color: Color) -> Self {
        Self { id, color }
    }
}

/// A cell on the grid (`None` = empty)
pub type Cell = Option<PieceRef>;

/// Receives a notification for every cell a grid mutation touches
///
/// Called synchronously from inside the mutation. Implementations only get
/// the coordinate and must read the new content through the grid's owner.
pub trait CellObserver: Send {
    fn cell_changed(&mut self, column: i32, row: i32);
}

impl<F> CellObserver for F
where
    F: FnMut(i32, i32) + Send,
{
    fn cell_changed(&mut self, column: i32, row: i32) {
        self(column, row)
    }
}

/// The playing field
pub struct Grid {
    columns: i32,
    rows: i32,
    /// Flat array of cells, row-major order (row * columns + column)
    cells: Vec<Cell>,
    observer: Option<Box<dyn CellObserver>>,
}

impl Grid {
    /// Create an empty grid without an observer
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns: columns as i32,
            rows: rows as i32,
            cells: vec![None; columns as usize * rows as usize],
            observer: None,
        }
    }

    /// Create an empty grid that reports cell changes to `observer`
    pub fn with_observer(columns: u16, rows: u16, observer: impl CellObserver + 'static) -> Self {
        let mut grid = Self::new(columns, rows);
        grid.set_observer(observer);
        grid
    }

    /// Replace the cell-change observer
    pub fn set_observer(&mut self, observer: impl CellObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline(always)]
    fn index(&self, column: i32, row: i32) -> Option<usize> {
        if !self.is_valid_cell(column, row) {
            return None;
        }
        Some((row * self.columns + column) as usize)
    }

    #[inline]
    fn notify(&mut self, column: i32, row: i32) {
        if let Some(observer) = self.observer.as_mut() {
            observer.cell_changed(column, row);
        }
    }

    /// Store `piece` at (column, row)
    ///
    /// Returns the stored reference, or `None` (and no change) when the
    /// coordinate is out of bounds.
    pub fn put(&mut self, column: i32, row: i32, piece: PieceRef) -> Option<PieceRef> {
        let idx = self.index(column, row)?;
        self.cells[idx] = Some(piece);
        self.notify(column, row);
        Some(piece)
    }

    /// Empty the cell at (column, row), returning its previous occupant
    pub fn remove(&mut self, column: i32, row: i32) -> Option<PieceRef> {
        let idx = self.index(column, row)?;
        let removed = self.cells[idx].take();
        self.notify(column, row);
        removed
    }

    /// Remove a row and let everything above it fall by one
    ///
    /// Returns whether `row` is a valid row index. The return value says
    /// that the shift happened, not that the row had any content.
    pub fn remove_row(&mut self, row: i32) -> bool {
        if !self.is_valid_row(row) {
            return false;
        }

        self.clear_row(row);

        let width = self.columns as usize;
        let start = row as usize * width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + width.., start);

        let top = (self.rows as usize - 1) * width;
        for cell in &mut self.cells[top..] {
            *cell = None;
        }

        for y in (row..self.rows).rev() {
            for x in 0..self.columns {
                self.notify(x, y);
            }
        }
        true
    }

    /// Empty every cell of one row without shifting
    pub fn clear_row(&mut self, row: i32) {
        if !self.is_valid_row(row) {
            return;
        }
        for x in 0..self.columns {
            self.remove(x, row);
        }
    }

    /// Empty the whole grid
    pub fn clear_all(&mut self) {
        for y in 0..self.rows {
            self.clear_row(y);
        }
    }

    /// Check if every cell of a row is occupied
    pub fn is_row_full(&self, row: i32) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Get the occupant of (column, row)
    pub fn get(&self, column: i32, row: i32) -> Option<PieceRef> {
        self.index(column, row).and_then(|idx| self.cells[idx])
    }

    /// Get one row as a slice, left to right
    pub fn row(&self, row: i32) -> Option<&[Cell]> {
        if !self.is_valid_row(row) {
            return None;
        }
        let width = self.columns as usize;
        let start = row as usize * width;
        Some(&self.cells[start..start + width])
    }

    pub fn is_valid_row(&self, row: i32) -> bool {
        row >= 0 && row < self.rows
    }

    pub fn is_valid_cell(&self, column: i32, row: i32) -> bool {
        self.is_valid_row(row) && column >= 0 && column < self.columns
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

/// Top row first, `X` for occupied and `.` for empty, one line per row
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.rows).rev() {
            for x in 0..self.columns {
                let symbol = if self.get(x, y).is_some() {
                    OCCUPIED_SYMBOL
                } else {
                    EMPTY_SYMBOL
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
