//! BoardView: maps grid coordinates to terminal positions and styles.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Cell;
use crate::types::Rgb;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Glyph and colors for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLook {
    pub glyph: &'static str,
    pub fg: Rgb,
    pub bg: Rgb,
}

const LIGHT_GRAY: Rgb = Rgb::new(192, 192, 192);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Placement of the field inside the terminal.
///
/// Each grid cell is two terminal columns wide to compensate for the glyph
/// aspect ratio. Row 0 of the grid is the bottom line of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    columns: u16,
    rows: u16,
    /// Top-left corner of the frame border.
    origin_x: u16,
    origin_y: u16,
}

impl BoardView {
    pub const CELL_W: u16 = 2;

    /// Center a `columns x rows` field in the viewport.
    pub fn centered(columns: u16, rows: u16, viewport: Viewport) -> Self {
        let mut view = Self {
            columns,
            rows,
            origin_x: 0,
            origin_y: 0,
        };
        let (frame_w, frame_h) = view.frame_size();
        view.origin_x = viewport.width.saturating_sub(frame_w) / 2;
        view.origin_y = viewport.height.saturating_sub(frame_h) / 2;
        view
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn origin(&self) -> (u16, u16) {
        (self.origin_x, self.origin_y)
    }

    /// Size including the one-character border.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            self.columns.saturating_mul(Self::CELL_W).saturating_add(2),
            self.rows.saturating_add(2),
        )
    }

    /// Terminal position of the left half of a grid cell.
    pub fn cell_position(&self, column: i32, row: i32) -> Option<(u16, u16)> {
        if column < 0 || row < 0 || column >= self.columns as i32 || row >= self.rows as i32 {
            return None;
        }
        let x = self
            .origin_x
            .saturating_add(1)
            .saturating_add((column as u16).saturating_mul(Self::CELL_W));
        let y = self
            .origin_y
            .saturating_add(1)
            .saturating_add(self.rows - 1 - row as u16);
        Some((x, y))
    }

    /// Line just below the frame, used for status text.
    pub fn status_line(&self) -> u16 {
        self.origin_y.saturating_add(self.rows).saturating_add(2)
    }

    /// How a cell looks: piece color when occupied, checkerboard when empty.
    pub fn look(column: i32, row: i32, cell: Cell) -> CellLook {
        match cell {
            Some(piece) => CellLook {
                glyph: "[]",
                fg: BLACK,
                bg: piece.color.rgb(),
            },
            None => {
                let bg = if column % 2 == row % 2 { LIGHT_GRAY } else { WHITE };
                CellLook {
                    glyph: "  ",
                    fg: BLACK,
                    bg,
                }
            }
        }
    }
}
