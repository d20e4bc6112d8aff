//! Keyboard handling for the interactive loop.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Stop the loop
    Quit,
    /// The terminal changed size; redraw
    Redraw,
    Ignore,
}

/// Map a terminal event to a loop action.
pub fn action_for(event: &Event) -> InputAction {
    match event {
        Event::Key(key) if is_quit(key) => InputAction::Quit,
        Event::Resize(..) => InputAction::Redraw,
        _ => InputAction::Ignore,
    }
}

/// `q`, `Esc` or `Ctrl-C`.
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
