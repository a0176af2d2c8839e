//! # Screen Writer
//!
//! Paints text at explicit 1-indexed `(col, row)` cells.
//!
//! `ScreenWriter` queues crossterm commands into any `Write`; nothing reaches
//! the terminal until `flush()`, which callers invoke once per redraw batch.
//! Every `write_at` is wrapped in save/restore cursor so the input cursor
//! the user sees stays parked in the query box.
//!
//! ```text
//! ESC 7  ESC [row;colH  ESC [38;5;Nm  text  ESC [0m  ESC 8
//! save   move           color        ...   reset    restore
//! ```

use std::io::{self, Write};

use crossterm::cursor::{MoveTo, RestorePosition, SavePosition};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::core::document::Highlight;

/// A display that can be painted cell by cell.
pub trait Surface {
    /// Paints `text` starting at `(col, row)`. Coordinates are 1-indexed.
    fn write_at(&mut self, col: u16, row: u16, text: &str, style: Highlight) -> io::Result<()>;

    /// Blanks every cell in the inclusive rectangle.
    fn erase_rect(&mut self, col1: u16, col2: u16, row1: u16, row2: u16) -> io::Result<()> {
        if col2 < col1 {
            return Ok(());
        }
        let blank = " ".repeat(usize::from(col2 - col1) + 1);
        for row in row1..=row2 {
            self.write_at(col1, row, &blank, Highlight::Plain)?;
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()>;

    /// Moves the visible input cursor. Best effort: surfaces that cannot
    /// place a cursor keep this no-op.
    fn position_cursor(&mut self, _col: u16, _row: u16) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()>;
}

/// Terminal color for a highlight. `None` keeps the default foreground.
pub fn highlight_color(style: Highlight) -> Option<Color> {
    match style {
        Highlight::Plain => None,
        Highlight::Title | Highlight::Warning => Some(Color::Yellow),
        Highlight::Heading => Some(Color::Red),
        Highlight::Banner => Some(Color::Green),
        Highlight::Chrome => Some(Color::Blue),
        Highlight::Query => Some(Color::Cyan),
        Highlight::Status => Some(Color::DarkGrey),
    }
}

pub struct ScreenWriter<W: Write> {
    out: W,
}

impl<W: Write> ScreenWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for ScreenWriter<W> {
    fn write_at(&mut self, col: u16, row: u16, text: &str, style: Highlight) -> io::Result<()> {
        queue!(
            self.out,
            SavePosition,
            MoveTo(col.saturating_sub(1), row.saturating_sub(1))
        )?;
        match highlight_color(style) {
            Some(color) => queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)?,
            None => queue!(self.out, Print(text))?,
        }
        queue!(self.out, RestorePosition)
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn position_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(col.saturating_sub(1), row.saturating_sub(1)))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
