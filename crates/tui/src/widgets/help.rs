//! Help overlay listing the key and pointer bindings, shown on `?`.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

/// Bindings grouped by what they act on.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Schedule",
        &[
            ("Hover", "Preview one hour"),
            ("Drag", "Paint a range of hours"),
            ("1 2 3", "Pick brush"),
            ("Tab", "Next brush"),
            ("Esc", "Cancel drag"),
        ],
    ),
    (
        "Limits",
        &[
            ("↑ ↓", "Select field"),
            ("Enter", "Edit or toggle field"),
            ("Esc", "Cancel edit"),
        ],
    ),
    (
        "Actions",
        &[
            ("Ctrl+S", "Apply settings"),
            ("Ctrl+R", "Reload settings"),
            ("f", "Toggle force start"),
            ("Ctrl+C", "Quit"),
            ("?", "Toggle help"),
        ],
    ),
];

const KEY_COLUMN: usize = 11;
const PANEL_WIDTH: u16 = 44;

/// Renders the help panel centered on `area`, over whatever is there.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use hourglass_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 30);
/// let mut buf = Buffer::empty(area);
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let lines = help_lines();
    // content plus the border
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let panel = centered_rect(PANEL_WIDTH, height, area);

    Clear.render(panel, buf);
    let accent = Style::default().fg(Color::LightYellow);
    Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(" Help ", accent.add_modifier(Modifier::BOLD)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(accent),
        )
        .render(panel, buf);
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Green);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(format!("  {title}"), heading)));
        lines.extend(bindings.iter().map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN$}"), key),
                Span::raw(*action),
            ])
        }));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    lines
}

/// A `width`×`height` rectangle centered on `area`, shrunk to fit it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
