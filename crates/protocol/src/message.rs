//! TUI message types for event handling.
//!
//! This module defines the message enum produced by the input handler and
//! consumed by the application. Pointer messages carry raw terminal
//! coordinates; the schedule widget hit-tests them into grid cells.

use serde::{Deserialize, Serialize};

use crate::state::ScheduleState;

/// Messages that represent user actions in the TUI.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::Message;
///
/// let msg = Message::PointerPress { column: 10, row: 3 };
/// assert!(msg.is_pointer());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Quit the application.
    Quit,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Escape: cancel a drag or close an overlay (contextual).
    Escape,
    /// Send the page's settings to the configuration service.
    Apply,
    /// Reload the page's settings from the configuration service.
    Reload,
    /// Flip the force-start flag of the selected items.
    ToggleForceStart,

    // --- Brush messages ---
    /// Pick a specific paint brush.
    SelectBrush {
        /// The state to paint with.
        state: ScheduleState,
    },
    /// Cycle to the next paint brush.
    NextBrush,

    // --- Pointer messages ---
    /// Left button pressed at coordinates.
    PointerPress {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// Pointer moved with the left button held.
    PointerDrag {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// Pointer moved with no button held.
    PointerMove {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// Left button released at coordinates.
    PointerRelease {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },

    // --- Settings form messages ---
    /// Move the field selection (positive = down, negative = up).
    SettingsNavigate {
        /// Direction to navigate.
        delta: i32,
    },
    /// Start editing (or toggle) the selected field.
    SettingsEdit,
    /// Confirm the current edit.
    SettingsConfirm,
    /// Cancel the current edit.
    SettingsCancel,
    /// Input a character while editing.
    SettingsInput {
        /// The character that was input.
        ch: char,
    },
    /// Delete the last character while editing.
    SettingsBackspace,
}

impl Message {
    /// Returns `true` if this message comes from the pointer.
    ///
    /// # Examples
    ///
    /// ```
    /// use hourglass_protocol::Message;
    ///
    /// assert!(Message::PointerRelease { column: 0, row: 0 }.is_pointer());
    /// assert!(!Message::Apply.is_pointer());
    /// ```
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerPress { .. }
                | Self::PointerDrag { .. }
                | Self::PointerMove { .. }
                | Self::PointerRelease { .. }
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message targets the settings form.
    ///
    /// # Examples
    ///
    /// ```
    /// use hourglass_protocol::Message;
    ///
    /// assert!(Message::SettingsEdit.is_settings());
    /// assert!(!Message::NextBrush.is_settings());
    /// ```
    #[must_use]
    pub fn is_settings(&self) -> bool {
        matches!(
            self,
            Self::SettingsNavigate { .. }
                | Self::SettingsEdit
                | Self::SettingsConfirm
                | Self::SettingsCancel
                | Self::SettingsInput { .. }
                | Self::SettingsBackspace
        )
    }
}
