//! The drag-to-paint state machine.
//!
//! The controller turns per-cell pointer events into cell-store operations:
//! hovering previews one cell, pressing anchors a drag, entering cells on
//! the anchor's day previews the range between the anchor and the pointer,
//! releasing commits that range. Entering another day mid-drag aborts the
//! whole gesture.
//!
//! ```text
//!            Enter            Down
//!   Idle ─────────────▶ Hovering ───────▶ Dragging(anchor)
//!    ▲  ◀───────────── │     ▲              │  │
//!    │      Leave       └─────┘ Enter       │  │ Enter (same day)
//!    │                                      │  └──────▶ preview [lo, hi]
//!    └──────────── Up (commit) / Enter (other day, abort) / cancel
//! ```

use hourglass_protocol::{CellPos, Grid, HourRange, ScheduleState, Weekday};

use super::renderer::GridRenderer;
use super::tooltip::{TooltipPresenter, hour_label};

/// The controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// The pointer is not over a cell and no drag is active.
    #[default]
    Idle,
    /// The pointer previews a single cell.
    Hovering(CellPos),
    /// A drag started at `anchor` is in progress.
    Dragging {
        /// The cell the drag started on.
        anchor: CellPos,
    },
}

/// A pointer event targeting one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// The button was pressed over the cell.
    Down(CellPos),
    /// The pointer moved onto the cell.
    Enter(CellPos),
    /// The button was released over the cell.
    Up(CellPos),
    /// The pointer moved off the cell.
    Leave(CellPos),
}

/// Everything a pointer event may mutate.
#[derive(Debug)]
pub struct Surface<'a> {
    /// The cell store.
    pub grid: &'a mut Grid,
    /// The presentation of the cells.
    pub renderer: &'a mut GridRenderer,
    /// The hour tooltips.
    pub tooltips: &'a mut TooltipPresenter,
}

impl Surface<'_> {
    fn render_day(&mut self, day: Weekday) {
        for hour in HourRange::FULL_DAY.hours() {
            self.renderer.render(self.grid, day, hour);
        }
    }

    fn revert_everything(&mut self) {
        self.grid.revert_all();
        self.renderer.render_all(self.grid);
        self.tooltips.hide_all();
    }
}

/// Drives the cell store from pointer events.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{CellPos, Grid, ScheduleState, StateScheme, Weekday};
/// use hourglass_tui::schedule::{
///     DragController, GridRenderer, PointerEvent, Surface, TooltipPresenter,
/// };
///
/// let mut grid = Grid::default();
/// let mut renderer = GridRenderer::new(StateScheme::default());
/// renderer.build(&grid);
/// let mut tooltips = TooltipPresenter::default();
/// let mut surface = Surface { grid: &mut grid, renderer: &mut renderer, tooltips: &mut tooltips };
///
/// let mut drag = DragController::default();
/// let brush = ScheduleState::Paused;
/// drag.handle(PointerEvent::Down(CellPos::new(Weekday::Sat, 1)), brush, &mut surface);
/// drag.handle(PointerEvent::Enter(CellPos::new(Weekday::Sat, 4)), brush, &mut surface);
/// drag.handle(PointerEvent::Up(CellPos::new(Weekday::Sat, 4)), brush, &mut surface);
///
/// assert_eq!(grid.cell(Weekday::Sat, 3).committed(), ScheduleState::Paused);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Handles one pointer event, painting with `brush`.
    pub fn handle(&mut self, event: PointerEvent, brush: ScheduleState, surface: &mut Surface<'_>) {
        match (event, self.state) {
            (PointerEvent::Down(cell), _) => {
                self.state = DragState::Dragging { anchor: cell };
            }
            (PointerEvent::Enter(cell), DragState::Idle | DragState::Hovering(_)) => {
                surface.grid.paint(cell.day, cell.hour, brush);
                surface.renderer.render(surface.grid, cell.day, cell.hour);
                surface.tooltips.show_left(hour_label(cell.hour), cell);
                surface.tooltips.hide_right();
                self.state = DragState::Hovering(cell);
            }
            (PointerEvent::Enter(cell), DragState::Dragging { anchor }) => {
                if cell.day != anchor.day {
                    self.abort(surface);
                    return;
                }
                let range = HourRange::between(anchor.hour, cell.hour);
                surface.grid.revert_outside(anchor.day, range);
                surface.grid.paint_range(anchor.day, range, brush);
                surface.render_day(anchor.day);
                Self::show_range_tooltips(anchor, cell, range, surface.tooltips);
            }
            (PointerEvent::Up(cell), DragState::Dragging { anchor }) => {
                let range = HourRange::between(anchor.hour, cell.hour);
                surface.grid.commit_range(anchor.day, range);
                surface.render_day(anchor.day);
                surface.tooltips.hide_all();
                self.state = DragState::Idle;
            }
            (PointerEvent::Leave(cell), DragState::Idle | DragState::Hovering(_)) => {
                surface.tooltips.hide_left();
                if surface.grid.cell(cell.day, cell.hour).is_previewing() {
                    surface.grid.revert_cell(cell.day, cell.hour);
                    surface.renderer.render(surface.grid, cell.day, cell.hour);
                }
                self.state = DragState::Idle;
            }
            (PointerEvent::Up(_), DragState::Idle | DragState::Hovering(_))
            | (PointerEvent::Leave(_), DragState::Dragging { .. }) => {}
        }
    }

    /// Cancels an active drag, reverting every cell.
    ///
    /// Returns `true` if a drag was cancelled.
    pub fn cancel(&mut self, surface: &mut Surface<'_>) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.abort(surface);
        true
    }

    fn abort(&mut self, surface: &mut Surface<'_>) {
        surface.revert_everything();
        self.state = DragState::Idle;
    }

    /// Left tooltip at the low end, right tooltip at the high end once the
    /// pointer has left the anchor hour.
    fn show_range_tooltips(
        anchor: CellPos,
        cell: CellPos,
        range: HourRange,
        tooltips: &mut TooltipPresenter,
    ) {
        tooltips.show_left(hour_label(range.lo()), CellPos::new(anchor.day, range.lo()));
        if cell.hour == anchor.hour {
            tooltips.hide_right();
        } else {
            tooltips.show_right(hour_label(range.hi()), CellPos::new(anchor.day, range.hi()));
        }
    }
}

#[cfg(test)]
mod tests {
    use hourglass_protocol::StateScheme;

    use super::*;

    struct Fixture {
        grid: Grid,
        renderer: GridRenderer,
        tooltips: TooltipPresenter,
        drag: DragController,
    }

    impl Fixture {
        fn new() -> Self {
            let grid = Grid::default();
            let mut renderer = GridRenderer::new(StateScheme::default());
            renderer.build(&grid);
            Self {
                grid,
                renderer,
                tooltips: TooltipPresenter::default(),
                drag: DragController::default(),
            }
        }

        fn send(&mut self, event: PointerEvent, brush: ScheduleState) {
            let mut surface = Surface {
                grid: &mut self.grid,
                renderer: &mut self.renderer,
                tooltips: &mut self.tooltips,
            };
            self.drag.handle(event, brush, &mut surface);
        }

        fn cancel(&mut self) -> bool {
            let mut surface = Surface {
                grid: &mut self.grid,
                renderer: &mut self.renderer,
                tooltips: &mut self.tooltips,
            };
            self.drag.cancel(&mut surface)
        }

        /// Press on `from`, enter each hour up to `to`, release on `to`.
        fn drag(&mut self, day: Weekday, from: u8, to: u8, brush: ScheduleState) {
            self.send(PointerEvent::Down(at(day, from)), brush);
            let hours: Vec<u8> = if from <= to {
                (from..=to).collect()
            } else {
                (to..=from).rev().collect()
            };
            for hour in hours.into_iter().skip(1) {
                self.send(PointerEvent::Enter(at(day, hour)), brush);
            }
            self.send(PointerEvent::Up(at(day, to)), brush);
        }

        fn left_text(&self) -> Option<&str> {
            self.tooltips
                .left()
                .filter(|t| t.is_visible())
                .map(|t| t.text())
        }

        fn right_text(&self) -> Option<&str> {
            self.tooltips
                .right()
                .filter(|t| t.is_visible())
                .map(|t| t.text())
        }
    }

    fn at(day: Weekday, hour: u8) -> CellPos {
        CellPos::new(day, hour)
    }

    const BRUSH: ScheduleState = ScheduleState::Throttled;

    #[test]
    fn hover_previews_one_cell_and_leave_reverts_it() {
        let mut f = Fixture::new();
        let wed5 = at(Weekday::Wed, 5);

        f.send(PointerEvent::Enter(wed5), BRUSH);
        assert_eq!(f.drag.state(), DragState::Hovering(wed5));
        assert_eq!(f.grid.cell(Weekday::Wed, 5).current(), BRUSH);
        assert_eq!(f.grid.cells().filter(|c| c.is_previewing()).count(), 1);
        assert_eq!(f.left_text(), Some("5 am"));
        assert_eq!(f.right_text(), None);

        f.send(PointerEvent::Leave(wed5), BRUSH);
        assert_eq!(f.drag.state(), DragState::Idle);
        assert_eq!(f.grid.cell(Weekday::Wed, 5).current(), ScheduleState::Normal);
        assert!(f.grid.is_settled());
        assert_eq!(f.left_text(), None);
    }

    #[test]
    fn drag_commits_the_range_on_one_day() {
        let mut f = Fixture::new();
        f.drag(Weekday::Mon, 3, 7, BRUSH);

        assert_eq!(f.drag.state(), DragState::Idle);
        for cell in f.grid.cells() {
            let inside = cell.day == Weekday::Mon && (3..=7).contains(&cell.hour);
            let expected = if inside { BRUSH } else { ScheduleState::Normal };
            assert_eq!(cell.current(), expected, "{:?}", cell.pos());
            assert_eq!(cell.committed(), expected, "{:?}", cell.pos());
        }
        assert!(f.tooltips.is_left_hidden());
        assert!(f.tooltips.is_right_hidden());
    }

    #[test]
    fn reversed_drag_commits_the_same_range() {
        let mut f = Fixture::new();
        f.drag(Weekday::Fri, 20, 15, ScheduleState::Paused);

        for hour in 0..24 {
            let expected = if (15..=20).contains(&hour) {
                ScheduleState::Paused
            } else {
                ScheduleState::Normal
            };
            assert_eq!(f.grid.cell(Weekday::Fri, hour).committed(), expected);
        }
        assert!(f.grid.is_settled());
    }

    #[test]
    fn entering_another_day_aborts_the_drag() {
        let mut f = Fixture::new();
        // an earlier committed paint must survive the abort
        f.drag(Weekday::Tue, 0, 1, ScheduleState::Paused);
        let before = f.grid.clone();

        f.send(PointerEvent::Enter(at(Weekday::Tue, 10)), BRUSH);
        f.send(PointerEvent::Down(at(Weekday::Tue, 10)), BRUSH);
        f.send(PointerEvent::Enter(at(Weekday::Tue, 12)), BRUSH);
        assert!(f.grid.cell(Weekday::Tue, 11).is_previewing());

        f.send(PointerEvent::Enter(at(Weekday::Wed, 10)), BRUSH);
        assert_eq!(f.drag.state(), DragState::Idle);
        assert_eq!(f.grid, before);
        assert!(f.tooltips.is_left_hidden());
        assert!(f.tooltips.is_right_hidden());
    }

    #[test]
    fn shrinking_a_drag_reverts_cells_outside_the_range() {
        let mut f = Fixture::new();
        f.send(PointerEvent::Down(at(Weekday::Thu, 8)), BRUSH);
        f.send(PointerEvent::Enter(at(Weekday::Thu, 12)), BRUSH);
        f.send(PointerEvent::Enter(at(Weekday::Thu, 9)), BRUSH);

        assert_eq!(f.grid.cell(Weekday::Thu, 9).current(), BRUSH);
        assert_eq!(f.grid.cell(Weekday::Thu, 10).current(), ScheduleState::Normal);
        assert_eq!(f.grid.cell(Weekday::Thu, 12).current(), ScheduleState::Normal);

        // crossing to the other side of the anchor
        f.send(PointerEvent::Enter(at(Weekday::Thu, 6)), BRUSH);
        assert_eq!(f.grid.cell(Weekday::Thu, 6).current(), BRUSH);
        assert_eq!(f.grid.cell(Weekday::Thu, 8).current(), BRUSH);
        assert_eq!(f.grid.cell(Weekday::Thu, 9).current(), ScheduleState::Normal);
    }

    #[test]
    fn drag_tooltips_mark_both_ends() {
        let mut f = Fixture::new();
        f.send(PointerEvent::Enter(at(Weekday::Sat, 13)), BRUSH);
        f.send(PointerEvent::Down(at(Weekday::Sat, 13)), BRUSH);
        assert_eq!(f.left_text(), Some("1 pm"));

        f.send(PointerEvent::Enter(at(Weekday::Sat, 15)), BRUSH);
        assert_eq!(f.left_text(), Some("1 pm"));
        assert_eq!(f.right_text(), Some("3 pm"));

        f.send(PointerEvent::Enter(at(Weekday::Sat, 11)), BRUSH);
        assert_eq!(f.left_text(), Some("11 am"));
        assert_eq!(f.right_text(), Some("1 pm"));

        f.send(PointerEvent::Enter(at(Weekday::Sat, 13)), BRUSH);
        assert_eq!(f.left_text(), Some("1 pm"));
        assert_eq!(f.right_text(), None);
    }

    #[test]
    fn leave_during_drag_is_ignored() {
        let mut f = Fixture::new();
        f.send(PointerEvent::Down(at(Weekday::Sun, 0)), BRUSH);
        f.send(PointerEvent::Enter(at(Weekday::Sun, 2)), BRUSH);
        f.send(PointerEvent::Leave(at(Weekday::Sun, 2)), BRUSH);

        assert!(f.drag.is_dragging());
        assert_eq!(f.grid.cell(Weekday::Sun, 2).current(), BRUSH);
    }

    #[test]
    fn cancel_reverts_an_active_drag_only() {
        let mut f = Fixture::new();
        assert!(!f.cancel());

        f.send(PointerEvent::Down(at(Weekday::Mon, 22)), BRUSH);
        f.send(PointerEvent::Enter(at(Weekday::Mon, 30)), BRUSH);
        // out-of-range hours are clamped to the last slot
        assert_eq!(f.grid.cell(Weekday::Mon, 23).current(), BRUSH);

        assert!(f.cancel());
        assert!(f.grid.is_settled());
        assert_eq!(f.grid.cell(Weekday::Mon, 23).current(), ScheduleState::Normal);
    }

    #[test]
    fn release_without_drag_does_nothing() {
        let mut f = Fixture::new();
        f.send(PointerEvent::Up(at(Weekday::Tue, 3)), BRUSH);
        assert_eq!(f.drag.state(), DragState::Idle);
        assert!(f.grid.is_settled());
    }

    #[test]
    fn renderer_follows_every_mutation() {
        let mut f = Fixture::new();
        f.drag(Weekday::Wed, 1, 2, ScheduleState::Paused);

        let expected = super::super::renderer::state_style(
            &StateScheme::default(),
            ScheduleState::Paused,
        );
        assert_eq!(f.renderer.style(at(Weekday::Wed, 2)), Some(expected));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn day_strategy() -> impl Strategy<Value = Weekday> {
            (0_usize..7).prop_map(|i| Weekday::ALL[i])
        }

        proptest! {
            /// However the pointer wanders over the anchor's day, releasing
            /// commits exactly the span between anchor and release.
            #[test]
            fn release_commits_only_the_final_span(
                day in day_strategy(),
                anchor in 0_u8..24,
                path in prop::collection::vec(0_u8..24, 1..12),
            ) {
                let mut f = Fixture::new();
                f.send(PointerEvent::Down(at(day, anchor)), BRUSH);
                for hour in &path {
                    f.send(PointerEvent::Enter(at(day, *hour)), BRUSH);
                }
                let last = path[path.len() - 1];
                f.send(PointerEvent::Up(at(day, last)), BRUSH);

                let range = HourRange::between(anchor, last);
                prop_assert!(f.grid.is_settled());
                for cell in f.grid.cells() {
                    let inside = cell.day == day && cell.hour >= range.lo() && cell.hour <= range.hi();
                    let expected = if inside { BRUSH } else { ScheduleState::Normal };
                    prop_assert_eq!(cell.committed(), expected);
                }
            }

            /// Cancelling mid-drag leaves the grid as it was.
            #[test]
            fn cancel_restores_the_grid(
                day in day_strategy(),
                anchor in 0_u8..24,
                path in prop::collection::vec(0_u8..24, 0..12),
            ) {
                let mut f = Fixture::new();
                f.send(PointerEvent::Down(at(day, anchor)), BRUSH);
                for hour in &path {
                    f.send(PointerEvent::Enter(at(day, *hour)), BRUSH);
                }

                prop_assert!(f.cancel());
                prop_assert!(f.grid.is_settled());
                prop_assert!(f.grid.cells().all(|c| c.current() == ScheduleState::Normal));
            }
        }
    }
}
