//! # TUI Adapter
//!
//! The terminal-specific layer. Owns the event loop, paints through a
//! `Surface`, and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about crossterm.
//!
//! ## Loop
//!
//! One thread owns the `Session`. Each tick it:
//!
//! 1. Polls the terminal size and feeds changes in as `Action::Resize`.
//! 2. Waits up to `tick_ms` for a key, then drains every queued key.
//! 3. Drains finished lookups from the channel.
//! 4. Flushes the batch of queued escape sequences once.
//!
//! Lookups run on tokio tasks and report back through an `mpsc` channel, so
//! the screen stays responsive (and quittable) while one is in flight. A
//! result that arrives after quit finds the receiver gone and is dropped.

mod event;
pub mod frame;
#[cfg(test)]
pub mod grid;
pub mod opener;
pub mod screen;
pub mod ui;

use log::{debug, info, warn};
use std::io::{self, BufWriter, stdout};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Session;
use crate::source::{ArticleSource, WikipediaSource};
use crate::tui::event::{poll_event_immediate, poll_event_timeout};
use crate::tui::opener::{BrowserOpener, UrlOpener};
use crate::tui::screen::{ScreenWriter, Surface};

/// Raw mode plus alternate screen for the lifetime of the reader.
///
/// Dropping it restores the terminal, also when the loop bails out with an
/// error.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Show)?;
        info!("Terminal modes enabled (raw, alternate screen)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Clear(ClearType::All), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Build the article source from a resolved config.
pub fn build_source(config: &ResolvedConfig) -> io::Result<Arc<dyn ArticleSource>> {
    let source = WikipediaSource::from_config(config).map_err(io::Error::other)?;
    Ok(Arc::new(source))
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let source = build_source(&config)?;
    let opener = BrowserOpener;
    let tick = Duration::from_millis(config.tick_ms);
    info!(
        "Reader starting with source {} (tick {}ms)",
        source.name(),
        config.tick_ms
    );

    let _terminal_mode_guard = TerminalModeGuard::new()?;
    let mut screen = ScreenWriter::new(BufWriter::new(stdout()));
    let mut session = Session::new();

    // Channel for actions from lookup tasks
    let (tx, rx) = mpsc::channel();
    let mut last_size: Option<(u16, u16)> = None;

    loop {
        let size = terminal::size()?;
        if last_size != Some(size) {
            last_size = Some(size);
            let (columns, rows) = size;
            let effect = update(&mut session, Action::Resize { columns, rows });
            apply_effect(effect, &mut session, &mut screen, &source, &opener, &tx)?;
        }

        // First event waits out the tick, the rest are drained immediately
        let mut next = poll_event_timeout(tick)?;
        while let Some(event) = next {
            let effect = update(&mut session, event.into_action());
            apply_effect(effect, &mut session, &mut screen, &source, &opener, &tx)?;
            if session.should_quit {
                break;
            }
            ui::draw_query(&mut screen, &session)?;
            next = poll_event_immediate()?;
        }

        if session.should_quit {
            info!("Quit requested");
            break;
        }

        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received lookup result");
            let effect = update(&mut session, action);
            apply_effect(effect, &mut session, &mut screen, &source, &opener, &tx)?;
        }

        screen.flush()?;
    }

    screen.clear_screen()?;
    screen.flush()?;
    Ok(())
}

/// Carries out what `update()` asked for: repaints and I/O.
fn apply_effect(
    effect: Effect,
    session: &mut Session,
    surface: &mut impl Surface,
    source: &Arc<dyn ArticleSource>,
    opener: &dyn UrlOpener,
    tx: &mpsc::Sender<Action>,
) -> io::Result<()> {
    match effect {
        Effect::None | Effect::Quit => Ok(()),
        Effect::RedrawQuery => ui::draw_query(surface, session),
        Effect::RedrawContent => ui::draw_content(surface, session),
        Effect::RedrawAll => ui::draw_all(surface, session),
        Effect::StartLookup(query) => {
            // Paint the loading state before the lookup can finish
            ui::draw_all(surface, session)?;
            surface.flush()?;
            spawn_lookup(source.clone(), query, tx.clone());
            Ok(())
        }
        Effect::OpenArticle(title) => {
            opener.open(&source.article_url(&title));
            Ok(())
        }
    }
}

fn spawn_lookup(source: Arc<dyn ArticleSource>, query: String, tx: mpsc::Sender<Action>) {
    info!("Spawning lookup for {:?} via {}", query, source.name());
    tokio::spawn(async move {
        let result = source.lookup(&query).await;
        if tx.send(Action::LookupFinished { query, result }).is_err() {
            warn!("Failed to deliver lookup result: receiver dropped");
        }
    });
}
