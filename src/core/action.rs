//! # Actions
//!
//! Everything that can happen in the reader becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! A lookup returns? That's `Action::LookupFinished { .. }`.
//!
//! The `update()` function applies an action to the session and returns an
//! `Effect` telling the adapter what to repaint or which I/O to start. No
//! side effects here. I/O happens elsewhere.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! Overlapping submits: Enter while a lookup is in flight is ignored and
//! the typed query is kept. A result for any query other than the pending
//! one is discarded.

use log::{debug, info, warn};

use crate::core::document::RawDocument;
use crate::core::state::Session;
use crate::core::viewport::Viewport;
use crate::source::{LookupOutcome, SourceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InsertChar(char),
    Backspace,
    Submit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    OpenArticle,
    Quit,
    Resize {
        columns: u16,
        rows: u16,
    },
    LookupFinished {
        query: String,
        result: Result<LookupOutcome, SourceError>,
    },
}

/// What the adapter must do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    RedrawQuery,
    RedrawContent,
    RedrawAll,
    /// Paint the loading state and start a lookup for this query.
    StartLookup(String),
    /// Open the page with this title in a browser.
    OpenArticle(String),
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::InsertChar(c) => {
            session.query.text.push(c);
            Effect::RedrawQuery
        }
        Action::Backspace => {
            if session.query.text.pop().is_some() {
                Effect::RedrawQuery
            } else {
                Effect::None
            }
        }
        Action::Submit => submit(session),
        Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
            let Some(viewport) = session.viewport else {
                return Effect::None;
            };
            let (total, rows) = (session.lines.len(), viewport.content_rows());
            match action {
                Action::ScrollUp => session.scroll.scroll_up(total, rows),
                Action::ScrollDown => session.scroll.scroll_down(total, rows),
                Action::PageUp => session.scroll.page_up(total, rows),
                _ => session.scroll.page_down(total, rows),
            }
            Effect::RedrawContent
        }
        Action::OpenArticle => match &session.document.page_title {
            Some(title) if session.document.is_openable() => Effect::OpenArticle(title.clone()),
            _ => Effect::None,
        },
        Action::Quit => {
            session.should_quit = true;
            Effect::Quit
        }
        Action::Resize { columns, rows } => resize(session, columns, rows),
        Action::LookupFinished { query, result } => finish_lookup(session, query, result),
    }
}

fn submit(session: &mut Session) -> Effect {
    if let Some(pending) = &session.pending {
        debug!("Ignoring submit while {:?} is loading", pending);
        return Effect::None;
    }
    if session.query.text.is_empty() {
        return Effect::None;
    }

    let query = std::mem::take(&mut session.query.text);
    info!("Submitting query {:?}", query);
    session.query.last_submitted = query.clone();
    session.pending = Some(query.clone());
    session.set_document(RawDocument::loading());
    Effect::StartLookup(query)
}

fn resize(session: &mut Session, columns: u16, rows: u16) -> Effect {
    match Viewport::from_size(columns, rows) {
        Ok(viewport) => {
            if session.viewport == Some(viewport) {
                return Effect::None;
            }
            debug!("Viewport now {}x{}", columns, rows);
            session.viewport = Some(viewport);
            session.relayout();
            Effect::RedrawAll
        }
        Err(e) => {
            debug!("Skipping render: {}", e);
            session.viewport = None;
            Effect::None
        }
    }
}

fn finish_lookup(
    session: &mut Session,
    query: String,
    result: Result<LookupOutcome, SourceError>,
) -> Effect {
    if session.pending.as_deref() != Some(query.as_str()) {
        warn!("Discarding stale lookup result for {:?}", query);
        return Effect::None;
    }
    session.pending = None;

    match &result {
        Ok(outcome) => info!("Lookup {:?} finished: {}", query, outcome.label()),
        Err(e) => warn!("Lookup {:?} failed: {}", query, e),
    }
    session.set_document(RawDocument::from_result(&query, result));
    debug!("Document wrapped to {} lines", session.lines.len());
    Effect::RedrawAll
}
