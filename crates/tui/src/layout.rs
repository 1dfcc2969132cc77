//! Centralized layout measurements for the TUI.
//!
//! This module defines the shared layout constants and the [`GridGeometry`]
//! used both to draw the weekly grid and to hit-test pointer coordinates
//! against it.

use hourglass_protocol::{CellPos, DAYS_PER_WEEK, HOURS_PER_DAY, Weekday};
use ratatui::layout::Rect;

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Width of the weekday label column ("Mon ").
pub const DAY_LABEL_WIDTH: u16 = 4;

/// Width of one hour cell.
pub const CELL_WIDTH: u16 = 3;

/// Rows per day: the cell row and the tooltip row below it.
pub const ROWS_PER_DAY: u16 = 2;

/// Width of the drawn grid.
pub const GRID_WIDTH: u16 = DAY_LABEL_WIDTH + CELL_WIDTH * HOURS_PER_DAY as u16;

/// Height of the drawn grid: hour ruler plus two rows per day.
pub const GRID_HEIGHT: u16 = 1 + ROWS_PER_DAY * DAYS_PER_WEEK as u16;

/// Height of the schedule panel: borders, grid, and the brush legend.
pub const SCHEDULE_PANEL_HEIGHT: u16 = GRID_HEIGHT + 3;

/// Height of the limits form panel: borders and eight fields.
pub const FORM_PANEL_HEIGHT: u16 = 10;

/// Height of the footer: force-start line and status line.
pub const FOOTER_HEIGHT: u16 = 2;

/// Minimum terminal height for useful rendering (content area).
pub const MIN_HEIGHT: u16 = SCHEDULE_PANEL_HEIGHT + FORM_PANEL_HEIGHT + FOOTER_HEIGHT;

/// Minimum terminal height for rendering with header.
///
/// Between `MIN_HEIGHT` and this value the header is hidden.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width: the grid plus the panel borders.
pub const MIN_WIDTH: u16 = GRID_WIDTH + 2;

/// Where the weekly grid was drawn.
///
/// The grid is laid out as:
///
/// ```text
/// row 0        hour ruler
/// row 1 + 2d   cells of day d
/// row 2 + 2d   tooltips of day d
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridGeometry {
    /// Top-left corner of the grid (the ruler row, label column).
    pub x: u16,
    /// Top row of the grid.
    pub y: u16,
}

impl GridGeometry {
    /// Creates the geometry of a grid whose top-left corner is `(x, y)`.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns the full area covered by the grid.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(self.x, self.y, GRID_WIDTH, GRID_HEIGHT)
    }

    /// Returns the row holding the cells of `day`.
    #[must_use]
    pub const fn day_row(&self, day: Weekday) -> u16 {
        self.y + 1 + ROWS_PER_DAY * day.index() as u16
    }

    /// Returns the row holding the tooltips of `day`.
    #[must_use]
    pub const fn tooltip_row(&self, day: Weekday) -> u16 {
        self.day_row(day) + 1
    }

    /// Returns the first column of the cells.
    #[must_use]
    pub const fn cells_x(&self) -> u16 {
        self.x + DAY_LABEL_WIDTH
    }

    /// Returns the area of one cell.
    #[must_use]
    pub fn cell_rect(&self, pos: CellPos) -> Rect {
        Rect::new(
            self.cells_x() + CELL_WIDTH * u16::from(pos.hour),
            self.day_row(pos.day),
            CELL_WIDTH,
            1,
        )
    }

    /// Returns the cell under the terminal coordinates, if any.
    ///
    /// Label, ruler and tooltip rows are not cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use hourglass_protocol::{CellPos, Weekday};
    /// use hourglass_tui::layout::GridGeometry;
    ///
    /// let geometry = GridGeometry::new(0, 0);
    /// assert_eq!(geometry.cell_at(4, 1), Some(CellPos::new(Weekday::Mon, 0)));
    /// assert_eq!(geometry.cell_at(4, 2), None);
    /// ```
    #[must_use]
    pub fn cell_at(&self, column: u16, row: u16) -> Option<CellPos> {
        let rel_x = column.checked_sub(self.cells_x())?;
        let rel_y = row.checked_sub(self.y + 1)?;
        if rel_y % ROWS_PER_DAY != 0 {
            return None;
        }

        let day = Weekday::from_index(usize::from(rel_y / ROWS_PER_DAY))?;
        let hour = rel_x / CELL_WIDTH;
        if usize::from(hour) >= HOURS_PER_DAY {
            return None;
        }
        u8::try_from(hour).ok().map(|hour| CellPos::new(day, hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fits_an_80_column_terminal() {
        assert_eq!(GRID_WIDTH, 76);
        assert!(MIN_WIDTH <= 80);
    }

    #[test]
    fn cell_at_maps_every_cell_back() {
        let geometry = GridGeometry::new(3, 5);
        for day in Weekday::ALL {
            for hour in 0..24 {
                let pos = CellPos::new(day, hour);
                let rect = geometry.cell_rect(pos);
                for dx in 0..CELL_WIDTH {
                    assert_eq!(geometry.cell_at(rect.x + dx, rect.y), Some(pos));
                }
            }
        }
    }

    #[test]
    fn cell_at_rejects_non_cell_areas() {
        let geometry = GridGeometry::new(0, 0);
        // label column
        assert_eq!(geometry.cell_at(1, 1), None);
        // ruler row
        assert_eq!(geometry.cell_at(10, 0), None);
        // tooltip row under Monday
        assert_eq!(geometry.cell_at(10, 2), None);
        // right of the last hour
        assert_eq!(geometry.cell_at(GRID_WIDTH, 1), None);
        // below Sunday
        assert_eq!(geometry.cell_at(10, GRID_HEIGHT), None);
    }

    #[test]
    fn sunday_is_on_the_last_cell_row() {
        let geometry = GridGeometry::new(0, 0);
        assert_eq!(geometry.day_row(Weekday::Sun), 13);
        assert_eq!(geometry.tooltip_row(Weekday::Sun), GRID_HEIGHT - 1);
    }
}
