use crate::core::document::StyledLine;
use crate::core::scroll::visible_slice;
use crate::core::state::Session;
use crate::tui::frame::FrameRenderer;
use crate::tui::screen::Surface;

use std::io;

/// Full repaint: chrome, content, then the query row so the cursor ends up
/// in the input box. Skipped while the terminal is too small.
pub fn draw_all(surface: &mut impl Surface, session: &Session) -> io::Result<()> {
    let Some(viewport) = session.viewport.as_ref() else {
        return Ok(());
    };
    let frame = FrameRenderer::new(viewport);
    frame.render_chrome(surface, session.document.is_openable())?;
    draw_content(surface, session)?;
    draw_query(surface, session)
}

/// Repaints only the content pane and the row counter.
pub fn draw_content(surface: &mut impl Surface, session: &Session) -> io::Result<()> {
    let Some(viewport) = session.viewport.as_ref() else {
        return Ok(());
    };
    let frame = FrameRenderer::new(viewport);
    if session.is_loading() {
        return frame.render_loading(surface);
    }

    let rows = viewport.content_rows();
    let total = session.lines.len();
    let visible: &[StyledLine] = visible_slice(&session.lines, session.scroll.offset(), rows);
    frame.render_content(surface, visible, &session.scroll.row_counter(total, rows))
}

pub fn draw_query(surface: &mut impl Surface, session: &Session) -> io::Result<()> {
    let Some(viewport) = session.viewport.as_ref() else {
        return Ok(());
    };
    FrameRenderer::new(viewport).render_query(surface, &session.query.text)
}
