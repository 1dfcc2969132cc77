//! The weekly schedule widget.
//!
//! [`ScheduleSelector`] composes the cell store with its renderer, the drag
//! controller, the tooltips and the brush legend. It turns raw terminal
//! pointer coordinates into per-cell pointer events, synthesizing enter and
//! leave events as the pointer crosses cell boundaries.
//!
//! # Modules
//!
//! - [`drag`]: The drag-to-paint state machine
//! - [`renderer`]: Value-to-style rendering of the cells
//! - [`tooltip`]: Hour labels shown next to the painted range
//! - [`brush`]: The paint brush selector and legend

pub mod brush;
pub mod drag;
pub mod renderer;
pub mod tooltip;

use hourglass_protocol::{CellPos, Grid, ScheduleMatrix, ScheduleState, StateScheme};
use ratatui::{buffer::Buffer, layout::Rect};

use crate::component::Component;
use crate::layout::{GRID_HEIGHT, GRID_WIDTH, GridGeometry};

pub use brush::BrushSelector;
pub use drag::{DragController, DragState, PointerEvent, Surface};
pub use renderer::GridRenderer;
pub use tooltip::{Tooltip, TooltipPresenter, hour_label};

/// The interactive 7×24 schedule grid.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{ScheduleState, Weekday};
/// use hourglass_tui::component::Component;
/// use hourglass_tui::schedule::ScheduleSelector;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let mut schedule = ScheduleSelector::default();
/// let area = Rect::new(0, 0, 80, 16);
/// let mut buf = Buffer::empty(area);
/// schedule.render(area, &mut buf);
///
/// // Monday 9am starts at column 4 + 3 * 9, on row 1
/// schedule.pointer_press(31, 1);
/// schedule.pointer_release(31, 1);
///
/// let matrix = schedule.get_config();
/// assert_eq!(matrix.get(Weekday::Mon, 9), ScheduleState::Throttled);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleSelector {
    grid: Grid,
    renderer: GridRenderer,
    tooltips: TooltipPresenter,
    drag: DragController,
    brush: BrushSelector,
    /// Where the grid was last drawn; `None` before the first render.
    geometry: Option<GridGeometry>,
    /// The cell under the pointer, as last seen.
    hovered: Option<CellPos>,
}

impl Default for ScheduleSelector {
    fn default() -> Self {
        Self::new(StateScheme::default())
    }
}

impl ScheduleSelector {
    /// Creates the widget with every cell on the scheme's initial state.
    #[must_use]
    pub fn new(scheme: StateScheme) -> Self {
        let grid = Grid::filled(scheme.initial());
        let mut renderer = GridRenderer::new(scheme.clone());
        renderer.build(&grid);
        Self {
            grid,
            renderer,
            tooltips: TooltipPresenter::default(),
            drag: DragController::default(),
            brush: BrushSelector::new(scheme),
            geometry: None,
            hovered: None,
        }
    }

    /// Returns the cell store.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the renderer.
    #[must_use]
    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    /// Returns the tooltips.
    #[must_use]
    pub fn tooltips(&self) -> &TooltipPresenter {
        &self.tooltips
    }

    /// Returns the brush selector.
    #[must_use]
    pub fn brush(&self) -> &BrushSelector {
        &self.brush
    }

    /// Selects the paint brush. Returns `false` if the scheme does not
    /// contain `state`.
    ///
    /// A hovered cell or an active drag range is repainted with the new brush.
    pub fn select_brush(&mut self, state: ScheduleState) -> bool {
        let changed = self.brush.select(state);
        if changed {
            self.refresh_hover();
        }
        changed
    }

    /// Selects the next brush of the scheme, repainting any hover preview.
    pub fn next_brush(&mut self) {
        self.brush.next();
        self.refresh_hover();
    }

    /// Returns the drag controller's state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Returns the displayed schedule as a matrix.
    #[must_use]
    pub fn get_config(&self) -> ScheduleMatrix {
        self.grid.to_matrix()
    }

    /// Loads a schedule, replacing every cell's displayed and committed value.
    ///
    /// An active drag or hover preview is discarded.
    pub fn set_config(&mut self, matrix: &ScheduleMatrix) {
        self.hovered = None;
        self.drag = DragController::default();
        self.tooltips.hide_all();
        self.grid.apply_matrix(matrix);
        self.renderer.render_all(&self.grid);
    }

    /// Loads a schedule from untyped hour-major rows.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidMatrix`](hourglass_protocol::ProtocolError::InvalidMatrix)
    /// if the rows are not 24×7 or hold an unknown state value. The grid is
    /// left untouched in that case.
    pub fn set_config_rows(&mut self, rows: &[Vec<i64>]) -> hourglass_protocol::Result<()> {
        let matrix = ScheduleMatrix::from_rows(rows)?;
        self.set_config(&matrix);
        Ok(())
    }

    /// Handles a button press at terminal coordinates.
    ///
    /// A press on the legend selects a brush; a press on a cell anchors a
    /// drag there.
    pub fn pointer_press(&mut self, column: u16, row: u16) {
        if let Some(state) = self.brush.state_at(column, row) {
            self.select_brush(state);
            return;
        }
        let Some(cell) = self.cell_at(column, row) else {
            return;
        };
        self.move_to(Some(cell));
        self.dispatch(PointerEvent::Down(cell));
    }

    /// Handles pointer movement to terminal coordinates, with or without
    /// the button held.
    pub fn pointer_move(&mut self, column: u16, row: u16) {
        let cell = self.cell_at(column, row);
        self.move_to(cell);
    }

    /// Handles a button release at terminal coordinates.
    ///
    /// Releasing outside the grid cancels an active drag.
    pub fn pointer_release(&mut self, column: u16, row: u16) {
        match self.cell_at(column, row) {
            Some(cell) => {
                self.move_to(Some(cell));
                self.dispatch(PointerEvent::Up(cell));
            }
            None => {
                self.move_to(None);
                self.cancel_drag();
            }
        }
    }

    /// Cancels an active drag, reverting every cell.
    ///
    /// Returns `true` if a drag was cancelled.
    pub fn cancel_drag(&mut self) -> bool {
        let mut surface = Surface {
            grid: &mut self.grid,
            renderer: &mut self.renderer,
            tooltips: &mut self.tooltips,
        };
        self.drag.cancel(&mut surface)
    }

    /// Paints `state` over one cell and commits it, as a single-cell drag
    /// would.
    pub fn paint_cell(&mut self, pos: CellPos, state: ScheduleState) {
        self.grid.paint(pos.day, pos.hour, state);
        self.grid.commit_cell(pos.day, pos.hour);
        self.renderer.render(&self.grid, pos.day, pos.hour);
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<CellPos> {
        self.geometry?.cell_at(column, row)
    }

    /// Synthesizes leave and enter events when the hovered cell changes.
    fn move_to(&mut self, cell: Option<CellPos>) {
        if self.hovered == cell {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.dispatch(PointerEvent::Leave(previous));
        }
        if let Some(cell) = cell {
            self.dispatch(PointerEvent::Enter(cell));
        }
        self.hovered = cell;
    }

    /// Re-enters the hovered cell so its preview follows the current brush.
    fn refresh_hover(&mut self) {
        if let Some(cell) = self.hovered {
            self.dispatch(PointerEvent::Enter(cell));
        }
    }

    fn dispatch(&mut self, event: PointerEvent) {
        let brush = self.brush.brush();
        let mut surface = Surface {
            grid: &mut self.grid,
            renderer: &mut self.renderer,
            tooltips: &mut self.tooltips,
        };
        self.drag.handle(event, brush, &mut surface);
    }
}

impl Component for ScheduleSelector {
    /// Draws the grid at the top of `area` and the brush legend below it.
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let geometry = GridGeometry::new(area.x, area.y);
        self.geometry = Some(geometry);

        if area.width < GRID_WIDTH || area.height < GRID_HEIGHT {
            return;
        }
        self.renderer.draw(&geometry, buf);
        self.tooltips.draw(&geometry, buf);

        if area.height > GRID_HEIGHT {
            let legend = Rect::new(area.x, area.y + GRID_HEIGHT, area.width, 1);
            self.brush.draw(legend, buf);
        }
    }
}
