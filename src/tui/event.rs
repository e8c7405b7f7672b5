use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    Save,   // Ctrl+S submits from anywhere
    Reload, // Ctrl+R re-fetches the list

    // TUI-local events (handled by the focused component)
    Submit, // Enter
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    FocusNext, // Tab
    FocusPrev, // Shift+Tab
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, waiting up to `timeout`. Terminal read errors are
/// treated as "no event".
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event.code, key_event.modifiers)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<TuiEvent> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(TuiEvent::Quit),
            KeyCode::Char('s') => Some(TuiEvent::Save),
            KeyCode::Char('r') => Some(TuiEvent::Reload),
            _ => None,
        };
    }
    match code {
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Esc => Some(TuiEvent::Quit),
        KeyCode::Tab => Some(TuiEvent::FocusNext),
        KeyCode::BackTab => Some(TuiEvent::FocusPrev),
        KeyCode::Left => Some(TuiEvent::Left),
        KeyCode::Right => Some(TuiEvent::Right),
        KeyCode::Home => Some(TuiEvent::Home),
        KeyCode::End => Some(TuiEvent::End),
        KeyCode::Up => Some(TuiEvent::Up),
        KeyCode::Down => Some(TuiEvent::Down),
        _ => None,
    }
}
