//! Hour tooltips shown next to the painted range.
//!
//! Two tooltips exist at most: the left one marks the lower-hour end of the
//! range, the right one the upper-hour end. Each is created on first use and
//! reused afterwards; hiding only flips its visibility.

use hourglass_protocol::CellPos;
use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
};

use crate::layout::{CELL_WIDTH, GridGeometry};

/// Converts an hour (`0..=23`) to its 12-hour wall-clock label.
///
/// # Examples
///
/// ```
/// use hourglass_tui::schedule::hour_label;
///
/// assert_eq!(hour_label(0), "12 am");
/// assert_eq!(hour_label(9), "9 am");
/// assert_eq!(hour_label(12), "12 pm");
/// assert_eq!(hour_label(13), "1 pm");
/// assert_eq!(hour_label(23), "11 pm");
/// ```
#[must_use]
pub fn hour_label(hour: u8) -> String {
    match hour {
        0 => "12 am".to_string(),
        1..=11 => format!("{hour} am"),
        12 => "12 pm".to_string(),
        _ => format!("{} pm", hour - 12),
    }
}

/// One tooltip overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    text: String,
    anchor: CellPos,
    visible: bool,
}

impl Tooltip {
    /// Returns the displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cell the tooltip is attached to.
    #[must_use]
    pub fn anchor(&self) -> CellPos {
        self.anchor
    }

    /// Returns `true` if the tooltip is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self, text: String, anchor: CellPos) {
        self.text = text;
        self.anchor = anchor;
        self.visible = true;
    }
}

/// Which side of its cell a tooltip hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// Below the cell, ending at its right edge.
    Left,
    /// Below the cell, starting at its left edge.
    Right,
}

/// Owns the left and right tooltips.
#[derive(Debug, Clone, Default)]
pub struct TooltipPresenter {
    left: Option<Tooltip>,
    right: Option<Tooltip>,
}

impl TooltipPresenter {
    /// Shows the left tooltip below `anchor`, ending at its right edge.
    pub fn show_left(&mut self, text: impl Into<String>, anchor: CellPos) {
        Self::show(&mut self.left, text.into(), anchor);
    }

    /// Shows the right tooltip below `anchor`, starting at its left edge.
    pub fn show_right(&mut self, text: impl Into<String>, anchor: CellPos) {
        Self::show(&mut self.right, text.into(), anchor);
    }

    /// Hides the left tooltip.
    pub fn hide_left(&mut self) {
        if let Some(tip) = &mut self.left {
            tip.visible = false;
        }
    }

    /// Hides the right tooltip.
    pub fn hide_right(&mut self) {
        if let Some(tip) = &mut self.right {
            tip.visible = false;
        }
    }

    /// Hides both tooltips.
    pub fn hide_all(&mut self) {
        self.hide_left();
        self.hide_right();
    }

    /// Returns `true` unless the left tooltip is shown.
    #[must_use]
    pub fn is_left_hidden(&self) -> bool {
        !self.left.as_ref().is_some_and(Tooltip::is_visible)
    }

    /// Returns `true` unless the right tooltip is shown.
    #[must_use]
    pub fn is_right_hidden(&self) -> bool {
        !self.right.as_ref().is_some_and(Tooltip::is_visible)
    }

    /// Returns the left tooltip, if it was ever created.
    #[must_use]
    pub fn left(&self) -> Option<&Tooltip> {
        self.left.as_ref()
    }

    /// Returns the right tooltip, if it was ever created.
    #[must_use]
    pub fn right(&self) -> Option<&Tooltip> {
        self.right.as_ref()
    }

    /// Draws the visible tooltips onto `buf`.
    pub fn draw(&self, geometry: &GridGeometry, buf: &mut Buffer) {
        let visible = [(&self.left, Side::Left), (&self.right, Side::Right)]
            .into_iter()
            .filter_map(|(tip, side)| tip.as_ref().filter(|t| t.visible).map(|t| (t, side)));

        for (tip, side) in visible {
            let cell = geometry.cell_rect(tip.anchor);
            let width = u16::try_from(tip.text.chars().count()).unwrap_or(u16::MAX);
            let x = match side {
                Side::Left => (cell.x + CELL_WIDTH).saturating_sub(width).max(geometry.x),
                Side::Right => cell.x,
            };
            let style = Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD);
            buf.set_string(x, geometry.tooltip_row(tip.anchor.day), &tip.text, style);
        }
    }

    fn show(slot: &mut Option<Tooltip>, text: String, anchor: CellPos) {
        match slot {
            Some(tip) => tip.show(text, anchor),
            None => {
                *slot = Some(Tooltip {
                    text,
                    anchor,
                    visible: true,
                });
            }
        }
    }
}
