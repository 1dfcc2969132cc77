//! Value-to-style rendering of the weekly grid.
//!
//! [`GridRenderer::build`] lays out all 168 cells once; afterwards
//! [`GridRenderer::render`] refreshes one cell's style from its displayed
//! value and must be called after every change to that value. Drawing to a
//! frame only copies the cached styles.

use hourglass_protocol::{
    CellPos, DAYS_PER_WEEK, Grid, HOURS_PER_DAY, Rgb, ScheduleState, StateScheme, Weekday,
};
use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
};

use crate::layout::{CELL_WIDTH, GridGeometry};

/// Glyphs of one cell: fill, then a border accent on the right edge.
const CELL_SYMBOL: &str = "  ▕";

/// Converts a scheme color to a terminal color.
#[must_use]
pub fn to_color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}

/// Returns the cell style for a state: fill as background, border as
/// foreground.
#[must_use]
pub fn state_style(scheme: &StateScheme, state: ScheduleState) -> Style {
    scheme
        .descriptor(state)
        .map_or_else(Style::default, |d| {
            Style::default().bg(to_color(d.fill)).fg(to_color(d.border))
        })
}

/// Keeps the presentation of every cell in sync with the grid.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    scheme: StateScheme,
    styles: Option<[[Style; HOURS_PER_DAY]; DAYS_PER_WEEK]>,
}

impl GridRenderer {
    /// Creates a renderer for a scheme. Nothing is laid out until
    /// [`build`](Self::build).
    #[must_use]
    pub fn new(scheme: StateScheme) -> Self {
        Self {
            scheme,
            styles: None,
        }
    }

    /// Returns the scheme used for styling.
    #[must_use]
    pub fn scheme(&self) -> &StateScheme {
        &self.scheme
    }

    /// Returns `true` once the grid has been laid out.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.styles.is_some()
    }

    /// Lays out every cell from the grid.
    pub fn build(&mut self, grid: &Grid) {
        let mut styles = [[Style::default(); HOURS_PER_DAY]; DAYS_PER_WEEK];
        for cell in grid.cells() {
            styles[cell.day.index()][usize::from(cell.hour)] =
                state_style(&self.scheme, cell.current());
        }
        self.styles = Some(styles);
    }

    /// Refreshes one cell's style from its displayed value.
    ///
    /// Idempotent. Does nothing before [`build`](Self::build).
    pub fn render(&mut self, grid: &Grid, day: Weekday, hour: u8) {
        let style = state_style(&self.scheme, grid.cell(day, hour).current());
        if let Some(styles) = &mut self.styles {
            styles[day.index()][usize::from(hour).min(HOURS_PER_DAY - 1)] = style;
        }
    }

    /// Refreshes every cell of every day.
    pub fn render_all(&mut self, grid: &Grid) {
        for cell in grid.cells() {
            self.render(grid, cell.day, cell.hour);
        }
    }

    /// Returns the cached style of a cell.
    #[must_use]
    pub fn style(&self, pos: CellPos) -> Option<Style> {
        self.styles
            .as_ref()
            .map(|styles| styles[pos.day.index()][usize::from(pos.hour).min(HOURS_PER_DAY - 1)])
    }

    /// Draws the ruler, the day labels and the cells.
    pub fn draw(&self, geometry: &GridGeometry, buf: &mut Buffer) {
        let Some(styles) = &self.styles else {
            return;
        };

        let ruler_style = Style::default().fg(Color::DarkGray);
        for hour in (0..24u8).step_by(3) {
            let x = geometry.cells_x() + CELL_WIDTH * u16::from(hour);
            buf.set_string(x, geometry.y, hour.to_string(), ruler_style);
        }

        let label_style = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD);
        for day in Weekday::ALL {
            let row = geometry.day_row(day);
            buf.set_string(geometry.x, row, day.label(), label_style);
            for (hour, style) in (0u8..).zip(styles[day.index()].iter()) {
                let rect = geometry.cell_rect(CellPos::new(day, hour));
                buf.set_string(rect.x, rect.y, CELL_SYMBOL, *style);
            }
        }
    }
}
