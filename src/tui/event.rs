use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Submit,
    InputChar(char),
    Backspace,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    OpenInBrowser,
}

impl TuiEvent {
    pub fn into_action(self) -> Action {
        match self {
            TuiEvent::Quit => Action::Quit,
            TuiEvent::Submit => Action::Submit,
            TuiEvent::InputChar(c) => Action::InsertChar(c),
            TuiEvent::Backspace => Action::Backspace,
            TuiEvent::ScrollUp => Action::ScrollUp,
            TuiEvent::ScrollDown => Action::ScrollDown,
            TuiEvent::ScrollPageUp => Action::PageUp,
            TuiEvent::ScrollPageDown => Action::PageDown,
            TuiEvent::OpenInBrowser => Action::OpenArticle,
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`. Non-key events yield `None`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key_event) => Ok(map_key(key_event)),
        _ => Ok(None),
    }
}

pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Release/repeat reports arrive on some platforms; only presses count
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
        (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        (_, KeyCode::Tab) => Some(TuiEvent::OpenInBrowser),
        _ => None,
    }
}
