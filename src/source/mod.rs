//! # Article Sources
//!
//! The lookup side of the application. A source turns a query into a
//! `LookupOutcome`; the core never talks HTTP itself.

pub mod provider;
pub mod providers;

pub use provider::{ArticleSource, LookupOutcome, SourceError};
pub use providers::WikipediaSource;
