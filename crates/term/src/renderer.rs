//! TerminalRenderer: draws the field to a real terminal.
//!
//! Commands are queued into a byte buffer first and written in one go, so a
//! cell update is a single write.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::board_view::BoardView;
use crate::core::{Cell, Grid};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clear the screen and draw the border and every cell.
    pub fn draw_full(&mut self, view: &BoardView, grid: &Grid) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        encode_frame_into(view, &mut self.buf)?;
        for row in 0..grid.rows() {
            for column in 0..grid.columns() {
                encode_cell_into(view, column, row, grid.get(column, row), &mut self.buf)?;
            }
        }
        self.flush_buf()
    }

    /// Redraw a single cell.
    pub fn draw_cell(&mut self, view: &BoardView, column: i32, row: i32, cell: Cell) -> Result<()> {
        self.buf.clear();
        encode_cell_into(view, column, row, cell, &mut self.buf)?;
        self.flush_buf()
    }

    /// Replace the status line below the field.
    pub fn draw_status(&mut self, view: &BoardView, text: &str) -> Result<()> {
        self.buf.clear();
        let (x, _) = view.origin();
        self.buf.queue(cursor::MoveTo(x, view.status_line()))?;
        self.buf.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        self.buf.queue(Print(text))?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the border around the field into `out`.
pub fn encode_frame_into(view: &BoardView, out: &mut Vec<u8>) -> Result<()> {
    let (x0, y0) = view.origin();
    let (w, h) = view.frame_size();
    let inner = "─".repeat((w - 2) as usize);

    out.queue(SetForegroundColor(rgb_to_color(Rgb::new(200, 200, 200))))?;
    out.queue(SetBackgroundColor(Color::Reset))?;
    out.queue(cursor::MoveTo(x0, y0))?;
    out.queue(Print(format!("┌{}┐", inner)))?;
    for y in 1..h - 1 {
        out.queue(cursor::MoveTo(x0, y0 + y))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(x0 + w - 1, y0 + y))?;
        out.queue(Print("│"))?;
    }
    out.queue(cursor::MoveTo(x0, y0 + h - 1))?;
    out.queue(Print(format!("└{}┘", inner)))?;
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode one grid cell into `out`; cells outside the view are skipped.
pub fn encode_cell_into(view: &BoardView, column: i32, row: i32, cell: Cell, out: &mut Vec<u8>) -> Result<()> {
    let Some((x, y)) = view.cell_position(column, row) else {
        return Ok(());
    };
    let look = BoardView::look(column, row, cell);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(SetForegroundColor(rgb_to_color(look.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(look.bg)))?;
    out.queue(Print(look.glyph))?;
    out.queue(ResetColor)?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
