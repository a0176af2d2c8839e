//! # Core Application Logic
//!
//! The reader's rendering and pagination logic. It knows nothing about
//! terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • layout / scroll      │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │  Article   │
//!          │  Adapter   │                │  Source    │
//!          │(crossterm) │                │ (reqwest)  │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`viewport`]: Screen geometry from the terminal size
//! - [`document`]: `RawDocument` and styled spans
//! - [`layout`]: Word wrapping into display lines
//! - [`scroll`]: Scroll offset and visible slices
//! - [`state`]: The `Session` struct, all reader state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file and environment resolution

pub mod action;
pub mod config;
pub mod document;
pub mod layout;
pub mod scroll;
pub mod state;
pub mod viewport;
