//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use hourglass_protocol::{Message, ScheduleState};

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// `is_editing` selects the key bindings of a form field being edited.
#[must_use]
pub fn event_to_message(event: &Event, is_editing: bool) -> Option<Message> {
    match event {
        Event::Key(key) if is_editing => key_to_edit_message(*key),
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to a pointer message.
///
/// Only the left button paints; motion without a button is tracked for
/// hover previews.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerPress { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::PointerDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerRelease { column, row }),
        MouseEventKind::Moved => Some(Message::PointerMove { column, row }),
        _ => None,
    }
}

/// Converts a terminal key event to an application message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Ctrl+S` | Apply settings |
/// | `Ctrl+R` | Reload settings |
/// | `Esc` | Escape (cancel drag or close help) |
/// | `?` | Toggle help |
/// | `f` | Toggle force start |
/// | `1` / `2` / `3` | Pick brush |
/// | `Tab` | Next brush |
/// | `Up` / `Down` | Move between form fields |
/// | `Enter` or `Space` | Edit or toggle the form field |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Message::Quit),
            KeyCode::Char('s') => Some(Message::Apply),
            KeyCode::Char('r') => Some(Message::Reload),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('f') => Some(Message::ToggleForceStart),

        // Brushes
        KeyCode::Char('1') => Some(Message::SelectBrush {
            state: ScheduleState::Normal,
        }),
        KeyCode::Char('2') => Some(Message::SelectBrush {
            state: ScheduleState::Throttled,
        }),
        KeyCode::Char('3') => Some(Message::SelectBrush {
            state: ScheduleState::Paused,
        }),
        KeyCode::Tab => Some(Message::NextBrush),

        // Form
        KeyCode::Up => Some(Message::SettingsNavigate { delta: -1 }),
        KeyCode::Down => Some(Message::SettingsNavigate { delta: 1 }),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::SettingsEdit),

        _ => None,
    }
}

/// Converts a key event while a form field is being edited.
///
/// # Key Bindings (Edit Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | `Enter` | Confirm |
/// | `Esc` | Cancel |
/// | `Backspace` | Backspace |
/// | Any char | Input |
#[must_use]
pub fn key_to_edit_message(key: KeyEvent) -> Option<Message> {
    // Check for Ctrl+C first (always works)
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(Message::SettingsConfirm),
        KeyCode::Esc => Some(Message::SettingsCancel),
        KeyCode::Backspace => Some(Message::SettingsBackspace),
        KeyCode::Char(ch) => Some(Message::SettingsInput { ch }),
        _ => None,
    }
}
