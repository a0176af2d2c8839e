//! # Session State
//!
//! Everything the reader knows, in one place, owned by the event loop.
//!
//! ```text
//! Session
//! ├── viewport: Option<Viewport>   // None while the terminal is too small
//! ├── query: QueryState            // text being typed + last submitted
//! ├── document: RawDocument        // current lookup result
//! ├── lines: DisplayLines          // document wrapped to the viewport
//! ├── scroll: ScrollState          // first visible line
//! ├── pending: Option<String>      // query with a lookup in flight
//! └── should_quit: bool
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.

use log::warn;

use crate::core::document::{DocumentKind, RawDocument};
use crate::core::layout::{self, DisplayLines};
use crate::core::scroll::ScrollState;
use crate::core::viewport::Viewport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub text: String,
    pub last_submitted: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub viewport: Option<Viewport>,
    pub query: QueryState,
    pub document: RawDocument,
    pub lines: DisplayLines,
    pub scroll: ScrollState,
    pub pending: Option<String>,
    pub should_quit: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            viewport: None,
            query: QueryState::default(),
            document: RawDocument::empty(),
            lines: Vec::new(),
            scroll: ScrollState::new(),
            pending: None,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.document.kind == DocumentKind::Loading
    }

    /// Visible content rows, 0 without a viewport.
    pub fn content_rows(&self) -> usize {
        self.viewport.map_or(0, |vp| vp.content_rows())
    }

    /// Replaces the document and scrolls back to the top.
    pub fn set_document(&mut self, document: RawDocument) {
        self.document = document;
        self.scroll.reset();
        self.relayout();
    }

    /// Re-wraps the document for the current viewport and re-clamps scroll.
    pub fn relayout(&mut self) {
        let Some(viewport) = self.viewport else {
            self.lines.clear();
            return;
        };
        match layout::wrap(&self.document.lines(), viewport.content_width()) {
            Ok(lines) => self.lines = lines,
            Err(e) => {
                warn!("Layout skipped: {}", e);
                self.lines.clear();
            }
        }
        self.scroll
            .reclamp(self.lines.len(), viewport.content_rows());
    }
}
