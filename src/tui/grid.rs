//! In-memory surface backed by a ratatui `Buffer`.
//!
//! Renders land in cells exactly as they would on a terminal, which makes
//! frames easy to assert on: read a row back as text, check a cell's color,
//! see where the cursor was parked.

use std::io;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};

use crate::core::document::Highlight;
use crate::tui::screen::Surface;

pub fn highlight_style(style: Highlight) -> Style {
    let fg = match style {
        Highlight::Plain => Color::Reset,
        Highlight::Title | Highlight::Warning => Color::Yellow,
        Highlight::Heading => Color::Red,
        Highlight::Banner => Color::Green,
        Highlight::Chrome => Color::Blue,
        Highlight::Query => Color::Cyan,
        Highlight::Status => Color::DarkGray,
    };
    Style::default().fg(fg)
}

pub struct GridSurface {
    buffer: Buffer,
    cursor: Option<(u16, u16)>,
    flushes: usize,
}

impl GridSurface {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, columns, rows)),
            cursor: None,
            flushes: 0,
        }
    }

    /// Last cursor position, 1-indexed.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Text of a 1-indexed row, trailing blanks trimmed.
    pub fn row_text(&self, row: u16) -> String {
        let y = row.saturating_sub(1);
        let text: String = (0..self.buffer.area.width)
            .filter_map(|x| self.buffer.cell(Position::new(x, y)))
            .map(|cell| cell.symbol())
            .collect();
        text.trim_end().to_string()
    }

    /// Every row, 1-indexed order.
    pub fn rows(&self) -> Vec<String> {
        (1..=self.buffer.area.height)
            .map(|row| self.row_text(row))
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.rows().iter().any(|row| row.contains(needle))
    }

    /// Foreground color of a 1-indexed cell.
    pub fn fg_at(&self, col: u16, row: u16) -> Option<Color> {
        self.buffer
            .cell(Position::new(col.saturating_sub(1), row.saturating_sub(1)))
            .map(|cell| cell.fg)
    }
}

impl Surface for GridSurface {
    fn write_at(&mut self, col: u16, row: u16, text: &str, style: Highlight) -> io::Result<()> {
        let (x, y) = (col.saturating_sub(1), row.saturating_sub(1));
        if x >= self.buffer.area.width || y >= self.buffer.area.height {
            return Ok(());
        }
        self.buffer.set_string(x, y, text, highlight_style(style));
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.buffer.reset();
        Ok(())
    }

    fn position_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.cursor = Some((col, row));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_back() {
        let mut grid = GridSurface::new(10, 3);
        grid.write_at(2, 2, "abc", Highlight::Heading).unwrap();
        assert_eq!(grid.row_text(2), " abc");
        assert_eq!(grid.fg_at(2, 2), Some(Color::Red));
        assert_eq!(grid.row_text(1), "");
    }

    #[test]
    fn test_writes_clip_at_edges() {
        let mut grid = GridSurface::new(5, 2);
        grid.write_at(4, 1, "overflow", Highlight::Plain).unwrap();
        grid.write_at(1, 9, "offscreen", Highlight::Plain).unwrap();
        assert_eq!(grid.row_text(1), "   ov");
        assert_eq!(grid.rows(), vec!["   ov".to_string(), String::new()]);
    }

    #[test]
    fn test_erase_and_clear() {
        let mut grid = GridSurface::new(6, 2);
        grid.write_at(1, 1, "abcdef", Highlight::Plain).unwrap();
        grid.erase_rect(2, 3, 1, 1).unwrap();
        assert_eq!(grid.row_text(1), "a  def");
        grid.clear_screen().unwrap();
        assert_eq!(grid.row_text(1), "");
    }
}
