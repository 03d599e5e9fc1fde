/// Crossterm backend for [`Renderer`]: the field is scaled onto the terminal
/// grid, one background-coloured cell per covered area.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Field, Point, Rect};
use crate::platform::{Color, Renderer, TextAlign};

/// Mapping between field units and terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub field: Field,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field: Field) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            field,
        }
    }

    fn col_of(&self, x: i32) -> i64 {
        i64::from(x) * i64::from(self.cols) / i64::from(self.field.width.max(1))
    }

    fn row_of(&self, y: i32) -> i64 {
        i64::from(y) * i64::from(self.rows) / i64::from(self.field.height.max(1))
    }

    /// Cell containing a field point; may lie outside the grid.
    pub fn to_cell(&self, p: Point) -> (i64, i64) {
        (self.col_of(p.x), self.row_of(p.y))
    }

    /// Field point at the centre of a cell.
    pub fn to_field(&self, col: u16, row: u16) -> Point {
        let x = (2 * i64::from(col) + 1) * i64::from(self.field.width) / (2 * i64::from(self.cols));
        let y = (2 * i64::from(row) + 1) * i64::from(self.field.height) / (2 * i64::from(self.rows));
        Point::new(x as i32, y as i32)
    }

    /// Half-open cell span covering a rect, clipped to the grid.  Anything
    /// visible covers at least one cell.
    pub fn cell_span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.w <= 0 || rect.h <= 0 {
            return None;
        }
        let c0 = self.col_of(rect.left()).max(0);
        let r0 = self.row_of(rect.top()).max(0);
        let c1 = (self.col_of(rect.right() - 1) + 1).min(i64::from(self.cols));
        let r1 = (self.row_of(rect.bottom() - 1) + 1).min(i64::from(self.rows));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, field: Field) -> Self {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(cols, rows, field);
        Self {
            out,
            viewport,
            cells: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        let idx = usize::from(row) * usize::from(self.viewport.cols) + usize::from(col);
        self.cells.get_mut(idx)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, color: Color) {
        if let Ok((cols, rows)) = terminal::size() {
            self.viewport = Viewport::new(cols, rows, self.viewport.field);
        }
        let blank = Cell {
            ch: ' ',
            fg: Color::WHITE,
            bg: color,
        };
        let len = usize::from(self.viewport.cols) * usize::from(self.viewport.rows);
        self.cells.clear();
        self.cells.resize(len, blank);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((c0, r0, c1, r1)) = self.viewport.cell_span(rect) else {
            return;
        };
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ' ';
                    cell.bg = color;
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let Some((c0, r0, c1, r1)) = self.viewport.cell_span(rect) else {
            return;
        };
        let (last_col, last_row) = (c1 - 1, r1 - 1);
        for row in r0..r1 {
            for col in c0..c1 {
                let ch = match (col == c0, col == last_col, row == r0, row == last_row) {
                    (true, _, true, _) => '┌',
                    (_, true, true, _) => '┐',
                    (true, _, _, true) => '└',
                    (_, true, _, true) => '┘',
                    (_, _, true, _) | (_, _, _, true) => '─',
                    (true, _, _, _) | (_, true, _, _) => '│',
                    _ => continue,
                };
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ch;
                    cell.fg = color;
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Point, color: Color, align: TextAlign) {
        let (col, row) = self.viewport.to_cell(pos);
        if row < 0 || row >= i64::from(self.viewport.rows) {
            return;
        }
        let len = text.chars().count() as i64;
        let start = match align {
            TextAlign::Left => col,
            TextAlign::Center => col - len / 2,
        };
        for (i, ch) in text.chars().enumerate() {
            let c = start + i as i64;
            if c < 0 || c >= i64::from(self.viewport.cols) {
                continue;
            }
            if let Some(cell) = self.cell_mut(c as u16, row as u16) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let cols = usize::from(self.viewport.cols);
        let mut current: Option<(Color, Color)> = None;
        for (row, line) in self.cells.chunks(cols).enumerate() {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in line {
                if current != Some((cell.fg, cell.bg)) {
                    self.out.queue(style::SetForegroundColor(to_term(cell.fg)))?;
                    self.out.queue(style::SetBackgroundColor(to_term(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

fn to_term(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
