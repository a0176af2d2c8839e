//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::action::{Action, update};
use crate::core::state::Session;
use crate::source::{ArticleSource, LookupOutcome, SourceError};
use crate::tui::opener::UrlOpener;

/// A source that answers every lookup with the same canned result.
pub struct StaticSource {
    pub result: Result<LookupOutcome, SourceError>,
}

#[async_trait]
impl ArticleSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn lookup(&self, _query: &str) -> Result<LookupOutcome, SourceError> {
        self.result.clone()
    }

    fn article_url(&self, title: &str) -> String {
        format!("https://example.org/wiki/{}", title.replace(' ', "_"))
    }
}

/// Records every URL it is asked to open.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
    }
}

pub fn found(title: &str, body: &str) -> LookupOutcome {
    LookupOutcome::Found {
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// A session that has already seen one resize to `columns` x `rows`.
pub fn sized_session(columns: u16, rows: u16) -> Session {
    let mut session = Session::new();
    update(&mut session, Action::Resize { columns, rows });
    session
}

pub fn type_query(session: &mut Session, text: &str) {
    for c in text.chars() {
        update(session, Action::InsertChar(c));
    }
}
