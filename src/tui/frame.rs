//! # Frame Renderer
//!
//! Draws the chrome and the dynamic regions for one `Viewport`.
//!
//! ## Regions
//!
//! - **Chrome**: title line, rounded box, query/content separator, status
//!   line. Drawn after a clear, so only on startup, resize and document
//!   changes.
//! - **Query row**: erased and repainted on every key press; the terminal
//!   cursor is parked right after the text.
//! - **Content**: every content row is rewritten in place. Short lines are
//!   padded with blanks to the content width, which overwrites whatever a
//!   previous, longer line left behind without erasing the region first.
//!   Over-long lines (unbreakable words) are clipped at the border.

use std::io;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::document::{Highlight, LOADING_TEXT, StyledLine};
use crate::core::viewport::Viewport;
use crate::tui::screen::Surface;

pub const TITLE: &str = "Wikipedia, the Free Encyclopedia";

const QUIT_HINT: &str = "esc quit";
const SCROLL_HINT: &str = "↑/↓ scroll";
const OPEN_HINT: &str = "tab open in browser";

pub struct FrameRenderer<'a> {
    viewport: &'a Viewport,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(viewport: &'a Viewport) -> Self {
        Self { viewport }
    }

    /// Clears the screen and draws the static frame.
    pub fn render_chrome(&self, surface: &mut impl Surface, has_document: bool) -> io::Result<()> {
        let vp = self.viewport;
        surface.clear_screen()?;

        let title = clip(TITLE, usize::from(vp.width - vp.left_pad));
        surface.write_at(vp.box_left(), vp.title_row(), &title, Highlight::Banner)?;

        self.horizontal(surface, vp.box_top(), '╭', '─', '╮')?;
        for row in vp.box_top() + 1..vp.box_bottom() {
            surface.write_at(vp.box_left(), row, "│", Highlight::Chrome)?;
            surface.write_at(vp.box_right(), row, "│", Highlight::Chrome)?;
        }
        self.horizontal(surface, vp.separator_row(), '├', '─', '┤')?;
        self.horizontal(surface, vp.box_bottom(), '╰', '─', '╯')?;

        let status = status_text(has_document);
        let status = clip(&status, usize::from(vp.box_right() - vp.box_left()) + 1);
        surface.write_at(vp.box_left(), vp.status_row(), &status, Highlight::Status)
    }

    /// Repaints the query row and parks the cursor after the text.
    ///
    /// A query wider than the box shows its tail, the part being typed.
    pub fn render_query(&self, surface: &mut impl Surface, query: &str) -> io::Result<()> {
        let vp = self.viewport;
        let row = vp.query_row();
        surface.erase_rect(vp.inner_left(), vp.inner_right(), row, row)?;

        // Keep one cell free for the cursor.
        let room = vp.content_width().saturating_sub(1);
        let visible = tail(query, room);
        surface.write_at(vp.inner_left(), row, &visible, Highlight::Query)?;

        let cursor_col = vp.inner_left() + visible.width() as u16;
        surface.position_cursor(cursor_col, row)
    }

    /// Writes `lines` into the content rows and the row counter into the
    /// bottom border.
    pub fn render_content(
        &self,
        surface: &mut impl Surface,
        lines: &[StyledLine],
        row_counter: &str,
    ) -> io::Result<()> {
        let vp = self.viewport;
        let width = vp.content_width();
        let blank = " ".repeat(width);

        for (index, row) in (vp.content_top()..=vp.content_bottom()).enumerate() {
            let Some(line) = lines.get(index) else {
                surface.write_at(vp.inner_left(), row, &blank, Highlight::Plain)?;
                continue;
            };

            let mut col = vp.inner_left();
            let mut used = 0;
            for span in &line.spans {
                let text = clip(&span.text, width - used);
                if text.is_empty() {
                    break;
                }
                surface.write_at(col, row, &text, span.style)?;
                let w = text.width();
                used += w;
                col += w as u16;
            }
            if used < width {
                surface.write_at(col, row, &blank[..width - used], Highlight::Plain)?;
            }
        }

        self.horizontal(surface, vp.box_bottom(), '╰', '─', '╯')?;
        if !row_counter.is_empty() {
            let label = format!(" {row_counter} ");
            let label_width = label.width();
            // Leave at least one border cell on each side.
            if label_width + 2 <= width {
                let col = vp.box_right() - 1 - label_width as u16;
                surface.write_at(col, vp.box_bottom(), &label, Highlight::Chrome)?;
            }
        }
        Ok(())
    }

    /// Content pane placeholder while a lookup is outstanding.
    pub fn render_loading(&self, surface: &mut impl Surface) -> io::Result<()> {
        self.render_content(surface, &[StyledLine::plain(LOADING_TEXT)], "")
    }

    fn horizontal(
        &self,
        surface: &mut impl Surface,
        row: u16,
        start: char,
        mid: char,
        end: char,
    ) -> io::Result<()> {
        let vp = self.viewport;
        let inner = usize::from(vp.box_right() - vp.box_left()).saturating_sub(1);
        let mut line = String::with_capacity(inner * 3 + 6);
        line.push(start);
        line.extend(std::iter::repeat_n(mid, inner));
        line.push(end);
        surface.write_at(vp.box_left(), row, &line, Highlight::Chrome)
    }
}

/// Status line entries; opening is only offered with a page loaded.
pub fn status_text(has_document: bool) -> String {
    let mut hints = vec![QUIT_HINT, SCROLL_HINT];
    if has_document {
        hints.push(OPEN_HINT);
    }
    hints.join(" · ")
}

/// Longest prefix of `text` that fits in `width` cells.
fn clip(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Longest suffix of `text` that fits in `width` cells.
fn tail(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (index, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = index;
    }
    text[start..].to_string()
}
