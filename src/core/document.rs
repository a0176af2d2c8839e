//! # Documents
//!
//! A `RawDocument` is what a lookup produces before any wrapping happens.
//! It is built once per lookup and replaced wholesale on the next one.
//!
//! Styling is attached here, at construction time, as structured spans.
//! Nothing downstream searches the text for markup: a MediaWiki heading
//! line such as `== History ==` is recognised while the body is split into
//! lines and the whole line is tagged `Highlight::Heading`.
//!
//! ```text
//! LookupOutcome ──from_result()──▶ RawDocument { kind, title, body }
//!                                        │
//!                                        ▼ lines()
//!                                  [StyledLine] ──layout::wrap()──▶ DisplayLines
//! ```

use unicode_width::UnicodeWidthStr;

use crate::source::{LookupOutcome, SourceError};

/// Tab stops are expanded to this many spaces so width math stays exact.
const TAB_WIDTH: usize = 4;

/// The ASCII banner shown while nothing has been looked up yet.
const BANNER: [&str; 6] = [
    r" _       ___ __   _                ___       ",
    r"| |     / (_) /__(_)___  ___  ____/ (_)___ _",
    r"| | /| / / / //_/ / __ \/ _ \/ __  / / __ `/",
    r"| |/ |/ / / ,< / / /_/ /  __/ /_/ / / /_/ / ",
    r"|__/|__/_/_/|_/_/ .___/\___/\__,_/_/\__,_/  ",
    r"               /_/                          ",
];

const BANNER_HINT: &str = "Type a query and press enter.";

pub const LOADING_TEXT: &str = "Loading...";

// ============================================================================
// Spans
// ============================================================================

/// Semantic style tag for a run of text.
///
/// The core only says *what* a span is. Mapping a tag to colors is the
/// terminal adapter's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Plain,
    Title,
    Heading,
    Warning,
    Banner,
    Chrome,
    Query,
    Status,
}

/// A run of text sharing one highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Highlight,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Highlight) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Highlight::Plain)
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// One line of styled text: an ordered list of spans with no newlines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub spans: Vec<Span>,
}

impl StyledLine {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn styled(text: impl Into<String>, style: Highlight) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            spans: vec![Span::new(text, style)],
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Highlight::Plain)
    }

    /// Appends `text`, extending the last span when the style matches.
    pub fn push_str(&mut self, text: &str, style: Highlight) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span::new(text, style)),
        }
    }

    pub fn extend(&mut self, spans: &[Span]) {
        for span in spans {
            self.push_str(&span.text, span.style);
        }
    }

    /// The visible text with styling dropped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}

// ============================================================================
// RawDocument
// ============================================================================

/// Where the content pane is in the lookup lifecycle.
///
/// ```text
/// Empty ──submit──▶ Loading ──▶ Article | Disambiguation | NotFound | Failed
///                      ▲                          │
///                      └──────── submit ──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Empty,
    Loading,
    Article,
    Disambiguation,
    NotFound,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub kind: DocumentKind,
    /// Title line, rendered first. Empty for placeholder documents.
    pub title: StyledLine,
    pub body: Vec<StyledLine>,
    /// Page title to open in a browser (articles and disambiguation pages).
    pub page_title: Option<String>,
}

impl RawDocument {
    /// The splash document shown before the first lookup.
    pub fn empty() -> Self {
        let mut body: Vec<StyledLine> = BANNER
            .iter()
            .map(|row| StyledLine::styled(*row, Highlight::Banner))
            .collect();
        body.push(StyledLine::default());
        body.push(StyledLine::plain(BANNER_HINT));
        Self {
            kind: DocumentKind::Empty,
            title: StyledLine::default(),
            body,
            page_title: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            kind: DocumentKind::Loading,
            title: StyledLine::default(),
            body: vec![StyledLine::plain(LOADING_TEXT)],
            page_title: None,
        }
    }

    /// Builds the document for a finished lookup of `query`.
    pub fn from_result(query: &str, result: Result<LookupOutcome, SourceError>) -> Self {
        match result {
            Ok(LookupOutcome::Found { title, body }) => Self {
                kind: DocumentKind::Article,
                title: StyledLine::styled(title.to_uppercase(), Highlight::Title),
                body: parse_body(&body),
                page_title: Some(title),
            },
            Ok(LookupOutcome::Disambiguation { options }) => Self {
                kind: DocumentKind::Disambiguation,
                title: StyledLine::styled(format!("{query} may refer to:"), Highlight::Title),
                body: options
                    .iter()
                    .map(|option| StyledLine::plain(normalize(option)))
                    .collect(),
                page_title: Some(query.to_string()),
            },
            Ok(LookupOutcome::NotFound) => Self {
                kind: DocumentKind::NotFound,
                title: StyledLine::default(),
                body: vec![StyledLine::styled(
                    format!("No pages found for '{query}'. Try a different query."),
                    Highlight::Warning,
                )],
                page_title: None,
            },
            Err(e) => Self {
                kind: DocumentKind::Failed,
                title: StyledLine::default(),
                body: vec![StyledLine::styled(
                    format!("Lookup failed: {e}. Press enter to retry."),
                    Highlight::Warning,
                )],
                page_title: None,
            },
        }
    }

    /// Whether there is a real page behind this document.
    pub fn is_openable(&self) -> bool {
        matches!(
            self.kind,
            DocumentKind::Article | DocumentKind::Disambiguation
        )
    }

    /// Title line (when present) followed by the body, ready for wrapping.
    pub fn lines(&self) -> Vec<StyledLine> {
        let mut lines = Vec::with_capacity(self.body.len() + 1);
        if !self.title.is_empty() {
            lines.push(self.title.clone());
        }
        lines.extend(self.body.iter().cloned());
        lines
    }
}

/// Splits an article body into lines and tags headings.
fn parse_body(body: &str) -> Vec<StyledLine> {
    body.split('\n')
        .map(|raw| {
            let line = normalize(raw);
            let style = if is_heading(&line) {
                Highlight::Heading
            } else {
                Highlight::Plain
            };
            StyledLine::styled(line, style)
        })
        .collect()
}

fn normalize(line: &str) -> String {
    line.trim_end_matches('\r')
        .replace('\t', &" ".repeat(TAB_WIDTH))
}

/// MediaWiki section heading: balanced runs of two or more `=` around text.
fn is_heading(line: &str) -> bool {
    let trimmed = line.trim();
    let open = trimmed.chars().take_while(|&c| c == '=').count();
    let close = trimmed.chars().rev().take_while(|&c| c == '=').count();
    if open < 2 || open != close || trimmed.len() <= open + close {
        return false;
    }
    let inner = &trimmed[open..trimmed.len() - close];
    !inner.trim().is_empty() && inner.starts_with(' ') && inner.ends_with(' ')
}
