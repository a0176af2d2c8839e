use std::fmt;

use async_trait::async_trait;

/// Errors an article source can report. The core shows them in the content
/// pane; none of them end the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Source misconfigured (bad URL, client could not be built).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API answered with an error.
    Api { status: u16, message: String },
    /// The response could not be understood.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// What a lookup found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found { title: String, body: String },
    /// The query names several articles; options are in source order.
    Disambiguation { options: Vec<String> },
    NotFound,
}

impl LookupOutcome {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            LookupOutcome::Found { .. } => "found",
            LookupOutcome::Disambiguation { .. } => "disambiguation",
            LookupOutcome::NotFound => "not-found",
        }
    }
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Resolves `query` to an article, a list of candidates, or nothing.
    /// Timeouts and retries are the source's own business.
    async fn lookup(&self, query: &str) -> Result<LookupOutcome, SourceError>;

    /// Browser URL for the page titled `title`.
    fn article_url(&self, title: &str) -> String;
}
