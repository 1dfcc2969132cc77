//! Limits form widget.
//!
//! Renders the spinner fields and checkboxes of the preferences page inside
//! a bordered panel.

use hourglass_protocol::UNLIMITED;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Widget},
};

use crate::form_state::{EditMode, FormField, LimitsForm};

/// Width of the label column.
const LABEL_WIDTH: usize = 34;

/// Renders the limits form panel.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use hourglass_tui::form_state::LimitsForm;
/// use hourglass_tui::widgets::render_limits_form;
///
/// let form = LimitsForm::default();
/// let area = Rect::new(0, 0, 60, 10);
/// let mut buf = Buffer::empty(area);
///
/// render_limits_form(&form, area, &mut buf);
/// ```
pub fn render_limits_form(form: &LimitsForm, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(Span::styled(
            " Throttled limits ",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let selected = form.selected_field();
    let items: Vec<ListItem> = FormField::ALL
        .iter()
        .map(|&field| field_line(form, field, field == selected))
        .map(ListItem::new)
        .collect();

    List::new(items).render(inner, buf);
}

fn field_line(form: &LimitsForm, field: FormField, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let prefix = if selected { "> " } else { "  " };

    if let Some(checked) = form.flag(field) {
        let mark = if checked { "[x] " } else { "[ ] " };
        return Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(mark, style),
            Span::styled(field.label(), style),
        ]);
    }

    let value = match (selected, form.edit_mode()) {
        (true, EditMode::Text { value, cursor }) => Span::styled(
            format!("{}_", &value[..*cursor]),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),
        ),
        _ => {
            let value = form.limit(field).unwrap_or(UNLIMITED);
            if value == UNLIMITED {
                Span::styled("unlimited", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(value.to_string(), style)
            }
        }
    };

    Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), style),
        value,
    ])
}
