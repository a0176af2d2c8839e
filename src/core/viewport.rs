//! # Viewport
//!
//! Screen geometry derived from the terminal size. All coordinates handed
//! out here are 1-indexed terminal cells.
//!
//! ```text
//! row 1              Wikipedia, the Free Encyclopedia
//! row 1+top     ╭──────────────────────────────────╮
//! row 2+top     │ query_                           │
//! row 3+top     ├──────────────────────────────────┤
//! row 4+top     │ content ...                      │
//!               │ ...                              │
//! row H-bottom  ╰───────────────────────── 1-18/90 ╯
//! row H           esc quit · ↑/↓ scroll · tab open
//!               ▲                                  ▲
//!           col 1+left                       col W-right
//! ```

use std::fmt;

/// Rows above the box (the title line sits there).
pub const TOP_PAD: u16 = 1;
/// Rows below the box (the status line sits there).
pub const BOTTOM_PAD: u16 = 1;
/// Widths above this get proportional side padding.
const WIDE_THRESHOLD: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// The terminal (or a requested content area) cannot hold the layout.
    /// `rows` is 0 when only a width was supplied.
    InvalidViewport { columns: u16, rows: u16 },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::InvalidViewport { columns, rows } => {
                write!(f, "invalid viewport: {columns}x{rows} is too small")
            }
        }
    }
}

impl std::error::Error for ViewError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub left_pad: u16,
    pub right_pad: u16,
    pub top_pad: u16,
    pub bottom_pad: u16,
}

impl Viewport {
    /// Computes the viewport for a terminal of `columns` x `rows`.
    ///
    /// Fails when there would be no room for at least one content cell.
    pub fn from_size(columns: u16, rows: u16) -> Result<Self, ViewError> {
        let side = if columns > WIDE_THRESHOLD {
            columns / 10
        } else {
            1
        };
        let viewport = Self {
            width: columns,
            height: rows,
            left_pad: side,
            right_pad: side,
            top_pad: TOP_PAD,
            bottom_pad: BOTTOM_PAD,
        };

        let min_width = u32::from(side) * 2 + 3;
        let min_height = u32::from(TOP_PAD) + u32::from(BOTTOM_PAD) + 5;
        if u32::from(columns) < min_width || u32::from(rows) < min_height {
            return Err(ViewError::InvalidViewport { columns, rows });
        }
        Ok(viewport)
    }

    /// Cells available for text on each content row.
    pub fn content_width(&self) -> usize {
        usize::from(self.width - self.left_pad - self.right_pad - 2)
    }

    /// Number of content rows inside the box.
    pub fn content_rows(&self) -> usize {
        usize::from(self.height - self.bottom_pad - self.top_pad - 4)
    }

    pub fn title_row(&self) -> u16 {
        1
    }

    pub fn box_left(&self) -> u16 {
        1 + self.left_pad
    }

    pub fn box_right(&self) -> u16 {
        self.width - self.right_pad
    }

    pub fn box_top(&self) -> u16 {
        1 + self.top_pad
    }

    pub fn box_bottom(&self) -> u16 {
        self.height - self.bottom_pad
    }

    pub fn query_row(&self) -> u16 {
        2 + self.top_pad
    }

    pub fn separator_row(&self) -> u16 {
        3 + self.top_pad
    }

    /// First column inside the box.
    pub fn inner_left(&self) -> u16 {
        self.box_left() + 1
    }

    /// Last column inside the box.
    pub fn inner_right(&self) -> u16 {
        self.box_right() - 1
    }

    pub fn content_top(&self) -> u16 {
        4 + self.top_pad
    }

    pub fn content_bottom(&self) -> u16 {
        self.box_bottom() - 1
    }

    pub fn status_row(&self) -> u16 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_terminal_uses_single_cell_padding() {
        let vp = Viewport::from_size(40, 20).unwrap();
        assert_eq!((vp.left_pad, vp.right_pad), (1, 1));
        assert_eq!(vp.content_width(), 36);
        assert_eq!(vp.content_rows(), 14);
    }

    #[test]
    fn test_wide_terminal_pads_ten_percent() {
        let vp = Viewport::from_size(80, 24).unwrap();
        assert_eq!((vp.left_pad, vp.right_pad), (8, 8));
        assert_eq!(vp.content_width(), 62);
        assert_eq!(vp.box_left(), 9);
        assert_eq!(vp.box_right(), 72);
        assert_eq!(vp.inner_right() - vp.inner_left() + 1, 62);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(Viewport::from_size(60, 24).unwrap().left_pad, 1);
        assert_eq!(Viewport::from_size(61, 24).unwrap().left_pad, 6);
    }

    #[test]
    fn test_rows_line_up() {
        let vp = Viewport::from_size(50, 12).unwrap();
        assert_eq!(vp.box_top(), 2);
        assert_eq!(vp.query_row(), 3);
        assert_eq!(vp.separator_row(), vp.box_top() + 2);
        assert_eq!(vp.content_top(), 5);
        assert_eq!(vp.content_bottom(), 10);
        assert_eq!(vp.box_bottom(), 11);
        assert_eq!(
            usize::from(vp.content_bottom() - vp.content_top() + 1),
            vp.content_rows()
        );
    }

    #[test]
    fn test_too_small_is_invalid() {
        assert_eq!(
            Viewport::from_size(3, 24),
            Err(ViewError::InvalidViewport { columns: 3, rows: 24 })
        );
        assert!(Viewport::from_size(40, 6).is_err());
        assert!(Viewport::from_size(0, 0).is_err());
        let smallest = Viewport::from_size(5, 7).unwrap();
        assert_eq!(smallest.content_width(), 1);
        assert_eq!(smallest.content_rows(), 1);
    }
}
