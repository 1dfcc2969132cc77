//! Limits form state management.
//!
//! This module provides the state behind the throttled-limits form: the five
//! integer spinner fields and the three checkboxes of the preferences page,
//! field selection, and edit mode handling.

use hourglass_protocol::{MAX_LIMIT, MIN_LIMIT, SchedulerConfig};

/// Fields of the limits form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Download speed while throttled.
    LowDown,
    /// Upload speed while throttled.
    LowUp,
    /// Active items while throttled.
    LowActive,
    /// Active downloading items while throttled.
    LowActiveDown,
    /// Active seeding items while throttled.
    LowActiveUp,
    /// Ignore the schedule entirely.
    IgnoreScheduler,
    /// Handle forced items individually.
    ForceUseIndividual,
    /// Clear the forced flag of finished items.
    ForceUnforceFinished,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 8] = [
        Self::LowDown,
        Self::LowUp,
        Self::LowActive,
        Self::LowActiveDown,
        Self::LowActiveUp,
        Self::IgnoreScheduler,
        Self::ForceUseIndividual,
        Self::ForceUnforceFinished,
    ];

    /// Returns the display label for this field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LowDown => "Download limit (KiB/s)",
            Self::LowUp => "Upload limit (KiB/s)",
            Self::LowActive => "Active items",
            Self::LowActiveDown => "Active downloading",
            Self::LowActiveUp => "Active seeding",
            Self::IgnoreScheduler => "Ignore schedule",
            Self::ForceUseIndividual => "Handle forced items individually",
            Self::ForceUnforceFinished => "Unforce finished items",
        }
    }

    /// Returns `true` for checkbox fields.
    #[must_use]
    pub fn is_toggle(self) -> bool {
        matches!(
            self,
            Self::IgnoreScheduler | Self::ForceUseIndividual | Self::ForceUnforceFinished
        )
    }

    /// Returns the position of a spinner field among the limits.
    fn limit_index(self) -> Option<usize> {
        match self {
            Self::LowDown => Some(0),
            Self::LowUp => Some(1),
            Self::LowActive => Some(2),
            Self::LowActiveDown => Some(3),
            Self::LowActiveUp => Some(4),
            _ => None,
        }
    }
}

/// Edit mode for form fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Not currently editing.
    #[default]
    None,
    /// Editing a spinner field.
    Text {
        /// The current value being edited.
        value: String,
        /// The cursor position within the value.
        cursor: usize,
    },
}

impl EditMode {
    /// Returns `true` if currently in edit mode.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns the current edit value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Text { value, .. } => Some(value),
        }
    }

    /// Returns the cursor position, if in edit mode.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Text { cursor, .. } => Some(*cursor),
        }
    }

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        if let Self::Text { value, cursor } = self {
            value.insert(*cursor, ch);
            *cursor += ch.len_utf8();
        }
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if let Self::Text { value, cursor } = self {
            if *cursor > 0 {
                // Find the previous character boundary
                let prev_boundary = value[..*cursor]
                    .char_indices()
                    .last()
                    .map_or(0, |(i, _)| i);
                value.remove(prev_boundary);
                *cursor = prev_boundary;
            }
        }
    }
}

/// State for the limits form.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::SchedulerConfig;
/// use hourglass_tui::form_state::{FormField, LimitsForm};
///
/// let mut form = LimitsForm::from_config(&SchedulerConfig::default());
/// form.start_edit();
/// form.backspace();
/// form.backspace();
/// form.input_char('5');
/// form.input_char('0');
/// assert!(form.confirm_edit());
///
/// let mut config = SchedulerConfig::default();
/// form.apply_to(&mut config);
/// assert_eq!(config.low_down, 50);
/// assert_eq!(form.selected_field(), FormField::LowDown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsForm {
    /// Spinner values, in [`FormField`] order.
    limits: [i64; 5],
    ignore_scheduler: bool,
    force_use_individual: bool,
    force_unforce_finished: bool,
    /// Whether the form has unapplied changes.
    dirty: bool,
    /// The selected field index.
    selected: usize,
    /// The current edit mode.
    edit_mode: EditMode,
}

impl Default for LimitsForm {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}

impl LimitsForm {
    /// Creates a form showing the record's values.
    #[must_use]
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            limits: config.limits(),
            ignore_scheduler: config.ignore_scheduler,
            force_use_individual: config.force_use_individual,
            force_unforce_finished: config.force_unforce_finished,
            dirty: false,
            selected: 0,
            edit_mode: EditMode::None,
        }
    }

    /// Replaces every value with the record's, keeping the selection.
    ///
    /// Any edit in progress is discarded.
    pub fn load(&mut self, config: &SchedulerConfig) {
        let selected = self.selected;
        *self = Self::from_config(config);
        self.selected = selected;
    }

    /// Writes the form's values into a record.
    pub fn apply_to(&self, config: &mut SchedulerConfig) {
        let [down, up, active, active_down, active_up] = self.limits;
        config.low_down = down;
        config.low_up = up;
        config.low_active = active;
        config.low_active_down = active_down;
        config.low_active_up = active_up;
        config.ignore_scheduler = self.ignore_scheduler;
        config.force_use_individual = self.force_use_individual;
        config.force_unforce_finished = self.force_unforce_finished;
    }

    /// Returns the value of a spinner field, or `None` for a checkbox.
    #[must_use]
    pub fn limit(&self, field: FormField) -> Option<i64> {
        field.limit_index().map(|i| self.limits[i])
    }

    /// Returns the value of a checkbox field, or `None` for a spinner.
    #[must_use]
    pub fn flag(&self, field: FormField) -> Option<bool> {
        match field {
            FormField::IgnoreScheduler => Some(self.ignore_scheduler),
            FormField::ForceUseIndividual => Some(self.force_use_individual),
            FormField::ForceUnforceFinished => Some(self.force_unforce_finished),
            _ => None,
        }
    }

    /// Returns whether the form has unapplied changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the form as applied (no longer dirty).
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Returns the selected field.
    #[must_use]
    pub fn selected_field(&self) -> FormField {
        FormField::ALL[self.selected.min(FormField::ALL.len() - 1)]
    }

    /// Returns a reference to the current edit mode.
    #[must_use]
    pub fn edit_mode(&self) -> &EditMode {
        &self.edit_mode
    }

    /// Returns `true` if currently in edit mode.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.edit_mode.is_editing()
    }

    /// Moves the selection.
    ///
    /// # Arguments
    ///
    /// * `delta` - Direction to navigate (positive = down, negative = up)
    pub fn navigate(&mut self, delta: i32) {
        let count = i64::try_from(FormField::ALL.len()).unwrap_or(i64::MAX);
        let current = i64::try_from(self.selected).unwrap_or(0);
        let next = (current + i64::from(delta)).rem_euclid(count);
        self.selected = usize::try_from(next).unwrap_or(0);
    }

    /// Starts editing the selected spinner, or flips the selected checkbox.
    pub fn start_edit(&mut self) {
        let field = self.selected_field();
        if let Some(value) = self.limit(field) {
            let value = value.to_string();
            self.edit_mode = EditMode::Text {
                cursor: value.len(),
                value,
            };
        } else {
            self.toggle(field);
        }
    }

    /// Confirms the current edit.
    ///
    /// Values are clamped to the accepted range. Returns `false` if the
    /// input is not an integer; the field keeps its value in that case.
    pub fn confirm_edit(&mut self) -> bool {
        let EditMode::Text { value, .. } = &self.edit_mode else {
            return true;
        };
        let Ok(parsed) = value.trim().parse::<i64>() else {
            self.edit_mode = EditMode::None;
            return false;
        };
        if let Some(i) = self.selected_field().limit_index() {
            let clamped = parsed.clamp(MIN_LIMIT, MAX_LIMIT);
            if self.limits[i] != clamped {
                self.limits[i] = clamped;
                self.dirty = true;
            }
        }
        self.edit_mode = EditMode::None;
        true
    }

    /// Cancels the current edit.
    pub fn cancel_edit(&mut self) {
        self.edit_mode = EditMode::None;
    }

    /// Handles character input while in edit mode.
    ///
    /// Only digits and a minus sign are accepted.
    pub fn input_char(&mut self, ch: char) {
        if ch.is_ascii_digit() || ch == '-' {
            self.edit_mode.insert_char(ch);
        }
    }

    /// Handles backspace while in edit mode.
    pub fn backspace(&mut self) {
        self.edit_mode.backspace();
    }

    fn toggle(&mut self, field: FormField) {
        let flag = match field {
            FormField::IgnoreScheduler => &mut self.ignore_scheduler,
            FormField::ForceUseIndividual => &mut self.force_use_individual,
            FormField::ForceUnforceFinished => &mut self.force_unforce_finished,
            _ => return,
        };
        *flag = !*flag;
        self.dirty = true;
    }
}
