//! The scheduler preferences page.
//!
//! The page composes the schedule widget with the limits form and converts
//! between them and the [`SchedulerConfig`] record exchanged with the
//! configuration service.

use hourglass_protocol::{ProtocolError, SchedulerConfig};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::component::Component;
use crate::form_state::LimitsForm;
use crate::layout::{FORM_PANEL_HEIGHT, SCHEDULE_PANEL_HEIGHT};
use crate::schedule::ScheduleSelector;
use crate::widgets::render_limits_form;

/// The preferences page: schedule grid plus limits form.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{SchedulerConfig, ScheduleState, Weekday};
/// use hourglass_tui::page::PreferencesPage;
///
/// let mut record = SchedulerConfig::default();
/// record.low_up = 30;
/// record.button_state.set(Weekday::Sun, 4, ScheduleState::Paused);
///
/// let mut page = PreferencesPage::default();
/// page.load_config(&record);
/// assert_eq!(page.to_config(), record);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PreferencesPage {
    schedule: ScheduleSelector,
    form: LimitsForm,
    /// The last loaded record; fields the page does not show are kept.
    loaded: SchedulerConfig,
}

impl PreferencesPage {
    /// Returns the schedule widget.
    #[must_use]
    pub fn schedule(&self) -> &ScheduleSelector {
        &self.schedule
    }

    /// Returns the schedule widget for pointer handling.
    pub fn schedule_mut(&mut self) -> &mut ScheduleSelector {
        &mut self.schedule
    }

    /// Returns the limits form.
    #[must_use]
    pub fn form(&self) -> &LimitsForm {
        &self.form
    }

    /// Returns the limits form for editing.
    pub fn form_mut(&mut self) -> &mut LimitsForm {
        &mut self.form
    }

    /// Pushes a record into every widget.
    ///
    /// An active drag is cancelled before the schedule is replaced.
    pub fn load_config(&mut self, record: &SchedulerConfig) {
        self.schedule.cancel_drag();
        self.schedule.set_config(&record.button_state);
        self.form.load(record);
        self.loaded = record.clone();
    }

    /// Builds a record from the widgets.
    #[must_use]
    pub fn to_config(&self) -> SchedulerConfig {
        let mut record = self.loaded.clone();
        record.button_state = self.schedule.get_config();
        self.form.apply_to(&mut record);
        record
    }

    /// Loads the schedule from untyped hour-major rows.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidMatrix`] if the rows are malformed;
    /// nothing changes in that case.
    pub fn set_schedule_rows(&mut self, rows: &[Vec<i64>]) -> Result<(), ProtocolError> {
        self.schedule.set_config_rows(rows)
    }

    /// Records `record` as applied to the service.
    pub fn mark_applied(&mut self, record: &SchedulerConfig) {
        self.loaded = record.clone();
        self.form.mark_saved();
    }

    /// Returns `true` if the widgets differ from the last loaded or applied
    /// record.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.form.is_dirty() || self.to_config() != self.loaded
    }
}

impl Component for PreferencesPage {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SCHEDULE_PANEL_HEIGHT),
                Constraint::Length(FORM_PANEL_HEIGHT),
                Constraint::Min(0),
            ])
            .split(area);

        let title = if self.is_modified() {
            " Schedule (modified) "
        } else {
            " Schedule "
        };
        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(chunks[0]);
        block.render(chunks[0], buf);
        self.schedule.render(inner, buf);

        render_limits_form(&self.form, chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use hourglass_protocol::{CellPos, ScheduleMatrix, ScheduleState, Weekday};

    use super::*;
    use crate::form_state::FormField;
    use crate::layout::{MIN_HEIGHT, MIN_WIDTH};

    fn record() -> SchedulerConfig {
        let mut record = SchedulerConfig {
            low_down: 250,
            low_active: 4,
            force_unforce_finished: false,
            ..Default::default()
        };
        record
            .button_state
            .set(Weekday::Tue, 22, ScheduleState::Throttled);
        record
    }

    #[test]
    fn load_then_to_config_is_identity() {
        let mut page = PreferencesPage::default();
        page.load_config(&record());
        assert_eq!(page.to_config(), record());
        assert!(!page.is_modified());
    }

    #[test]
    fn to_config_reflects_widget_edits() {
        let mut page = PreferencesPage::default();
        page.load_config(&record());

        page.schedule_mut()
            .paint_cell(CellPos::new(Weekday::Mon, 0), ScheduleState::Paused);
        page.form_mut().navigate(1);
        page.form_mut().start_edit();
        page.form_mut().backspace();
        page.form_mut().backspace();
        page.form_mut().input_char('9');
        assert!(page.form_mut().confirm_edit());

        let out = page.to_config();
        assert!(page.is_modified());
        assert_eq!(out.button_state.get(Weekday::Mon, 0), ScheduleState::Paused);
        assert_eq!(out.low_up, 9);
        assert_eq!(page.form().limit(FormField::LowUp), Some(9));
        assert_eq!(out.low_down, 250);

        page.mark_applied(&out);
        assert!(!page.is_modified());
    }

    #[test]
    fn malformed_rows_leave_the_page_unchanged() {
        let mut page = PreferencesPage::default();
        page.load_config(&record());

        let rows = vec![vec![0_i64; 6]; 24];
        assert!(page.set_schedule_rows(&rows).is_err());
        assert_eq!(page.to_config(), record());

        let rows = ScheduleMatrix::default()
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(i64::from).collect())
            .collect::<Vec<Vec<i64>>>();
        page.set_schedule_rows(&rows).unwrap();
        assert_eq!(page.to_config().button_state, ScheduleMatrix::default());
    }

    #[test]
    fn render_lays_out_both_panels() {
        let mut page = PreferencesPage::default();
        let area = Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT);
        let mut buf = Buffer::empty(area);
        page.render(area, &mut buf);

        let rendered = crate::test_utils::buffer_to_string(&buf);
        assert!(rendered.contains(" Schedule "));
        assert!(rendered.contains(" Throttled limits "));
        assert!(rendered.contains("Download limit (KiB/s)"));
        assert!(rendered.contains("[ ] Ignore schedule"));
        assert!(rendered.contains("Mon"));
    }
}
