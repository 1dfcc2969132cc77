//! Footer widget: the force-start line and the status line.

use hourglass_protocol::ScheduleState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::force::ForceStartToggle;

/// A message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Something completed.
    Info(String),
    /// Something failed.
    Error(String),
}

impl StatusMessage {
    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text,
        }
    }
}

/// What the footer shows.
#[derive(Debug, Clone, Copy)]
pub struct Footer<'a> {
    /// The force-start toggle.
    pub force: &'a ForceStartToggle,
    /// Number of selected items.
    pub selected: usize,
    /// The state the schedule puts in effect now.
    pub active: ScheduleState,
    /// The current brush.
    pub brush: ScheduleState,
    /// The latest status message.
    pub message: Option<&'a StatusMessage>,
}

/// Renders the two footer lines.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::ScheduleState;
/// use ratatui::{buffer::Buffer, layout::Rect};
/// use hourglass_tui::force::ForceStartToggle;
/// use hourglass_tui::widgets::{Footer, render_status_bar};
///
/// let force = ForceStartToggle::default();
/// let footer = Footer {
///     force: &force,
///     selected: 2,
///     active: ScheduleState::Normal,
///     brush: ScheduleState::Throttled,
///     message: None,
/// };
/// let area = Rect::new(0, 0, 80, 2);
/// let mut buf = Buffer::empty(area);
/// render_status_bar(&footer, area, &mut buf);
/// ```
pub fn render_status_bar(footer: &Footer<'_>, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Green);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mark = if footer.force.is_checked() { "[x]" } else { "[ ]" };
    let mut force_spans = vec![
        Span::styled(format!("{mark} "), Style::default().fg(Color::White)),
        Span::styled("Force start", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" ({} selected)", footer.selected), dim_style),
    ];
    if footer.force.is_pending() {
        force_spans.push(Span::styled(" …", dim_style));
    }
    force_spans.push(Span::styled("  f", key_style));
    force_spans.push(Span::styled(" toggle", dim_style));

    let mut status_spans = vec![
        Span::styled("Now: ", dim_style),
        Span::styled(footer.active.name(), Style::default().fg(Color::Cyan)),
        Span::styled("  Brush: ", dim_style),
        Span::styled(footer.brush.name(), Style::default().fg(Color::Yellow)),
    ];
    if let Some(message) = footer.message {
        let style = match message {
            StatusMessage::Info(_) => Style::default().fg(Color::Green),
            StatusMessage::Error(_) => Style::default().fg(Color::Red),
        };
        status_spans.push(Span::styled("  │ ", dim_style));
        status_spans.push(Span::styled(message.text().to_string(), style));
    }

    Paragraph::new(vec![Line::from(force_spans), Line::from(status_spans)]).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(footer: &Footer<'_>) -> String {
        let area = Rect::new(0, 0, 70, 2);
        let mut buf = Buffer::empty(area);
        render_status_bar(footer, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn footer_shows_force_and_state() {
        let mut force = ForceStartToggle::default();
        force.refresh(&[true]);
        let message = StatusMessage::Error("apply failed: disk full".to_string());
        let footer = Footer {
            force: &force,
            selected: 1,
            active: ScheduleState::Paused,
            brush: ScheduleState::Throttled,
            message: Some(&message),
        };

        insta::assert_snapshot!(render(&footer), @r"
        [x] Force start (1 selected)  f toggle
        Now: Paused  Brush: Throttled  │ apply failed: disk full
        ");
    }

    #[test]
    fn pending_change_is_marked() {
        let mut force = ForceStartToggle::default();
        let _ = force.toggle();
        let footer = Footer {
            force: &force,
            selected: 0,
            active: ScheduleState::Normal,
            brush: ScheduleState::Normal,
            message: None,
        };
        let rendered = render(&footer);
        assert!(rendered.contains("[x] Force start (0 selected) …"));
        assert!(!rendered.contains('│'));
    }
}
