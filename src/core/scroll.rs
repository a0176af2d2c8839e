//! # Pagination
//!
//! Vertical scroll position into the display lines. The offset is the index
//! of the first visible line and always satisfies
//! `0 <= offset <= max(0, total - rows)`. Scrolling past either end is a
//! no-op, never an error.

/// Clamps `offset` so the last page is the furthest one can scroll.
pub fn clamp_offset(offset: usize, total: usize, rows: usize) -> usize {
    offset.min(total.saturating_sub(rows))
}

/// The lines visible at `offset`, never more than `rows` of them and never
/// reaching past the end of `lines`.
pub fn visible_slice<T>(lines: &[T], offset: usize, rows: usize) -> &[T] {
    let start = offset.min(lines.len());
    let end = start.saturating_add(rows).min(lines.len());
    &lines[start..end]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Back to the top (new document).
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Re-applies the bounds after the content or viewport changed.
    pub fn reclamp(&mut self, total: usize, rows: usize) {
        self.offset = clamp_offset(self.offset, total, rows);
    }

    pub fn scroll_up(&mut self, total: usize, rows: usize) {
        self.offset = clamp_offset(self.offset.saturating_sub(1), total, rows);
    }

    pub fn scroll_down(&mut self, total: usize, rows: usize) {
        self.offset = clamp_offset(self.offset.saturating_add(1), total, rows);
    }

    pub fn page_up(&mut self, total: usize, rows: usize) {
        self.offset = clamp_offset(self.offset.saturating_sub(rows.max(1)), total, rows);
    }

    pub fn page_down(&mut self, total: usize, rows: usize) {
        self.offset = clamp_offset(self.offset.saturating_add(rows.max(1)), total, rows);
    }

    /// One past the last visible line.
    pub fn visible_end(&self, total: usize, rows: usize) -> usize {
        total.min(self.offset.saturating_add(rows))
    }

    /// Row counter text, e.g. `1-18/90`. Empty when there is nothing to count.
    pub fn row_counter(&self, total: usize, rows: usize) -> String {
        if total == 0 {
            return String::new();
        }
        format!(
            "{}-{}/{}",
            self.offset + 1,
            self.visible_end(total, rows),
            total
        )
    }
}
