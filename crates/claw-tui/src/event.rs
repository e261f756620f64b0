//! Terminal event handling.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Terminal event types.
#[derive(Debug)]
pub enum TermEvent {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// No event (tick).
    Tick,
}

/// Poll for terminal events with a timeout.
///
/// Key releases and repeats are folded into ticks so each press is seen once.
pub fn poll_event(timeout: Duration) -> std::io::Result<TermEvent> {
    if !event::poll(timeout)? {
        return Ok(TermEvent::Tick);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(TermEvent::Key(key)),
        Event::Resize(w, h) => Ok(TermEvent::Resize(w, h)),
        _ => Ok(TermEvent::Tick),
    }
}

/// Check if a key event is Ctrl+<c>.
pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Ctrl+C or Escape: leave the wizard.
pub fn is_cancel(key: &KeyEvent) -> bool {
    is_ctrl(key, 'c') || key.code == KeyCode::Esc
}

/// A printable character without Ctrl/Alt held.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}
