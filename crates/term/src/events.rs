//! The read-side half of the driver: event capture and translation.
//!
//! Crossterm's native events are translated into the engine's closed
//! [`Event`] union here, so nothing outside this crate dispatches on driver
//! types. Only key *presses* pass through: repeat and release are dropped,
//! as are mouse, focus and paste events.

use std::time::Duration;

use anyhow::Result;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use termgame_types::{Event, Key};

/// A blocking-with-timeout event source, polled by the input pump from its
/// own thread.
pub trait EventSource: Send {
    /// Wait up to `timeout` for the next event. `Ok(None)` means the timeout
    /// elapsed, or an event arrived that has no engine translation.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// The real terminal's event stream.
pub struct TerminalEvents;

impl TerminalEvents {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(translate(event::read()?))
    }
}

/// Translate a crossterm event into the engine's event union.
pub fn translate(ev: event::Event) -> Option<Event> {
    match ev {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => {
            translate_key(key).map(Event::Key)
        }
        event::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = key.code {
            return Some(Key::Ctrl(c.to_ascii_lowercase()));
        }
    }
    match key.code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::F(n) => Some(Key::F(n)),
        // Key::Null is reserved for "no end key" and is never produced.
        _ => None,
    }
}
