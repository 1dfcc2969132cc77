//! The paint brush selector and its legend.

use hourglass_protocol::{ScheduleState, StateScheme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::renderer::{state_style, to_color};

/// Gap between two legend entries.
const ENTRY_GAP: u16 = 2;

/// Picks the state that painting applies.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{ScheduleState, StateScheme};
/// use hourglass_tui::schedule::BrushSelector;
///
/// let mut brush = BrushSelector::new(StateScheme::default());
/// assert_eq!(brush.brush(), ScheduleState::Throttled);
///
/// brush.next();
/// assert_eq!(brush.brush(), ScheduleState::Paused);
/// brush.next();
/// assert_eq!(brush.brush(), ScheduleState::Normal);
/// ```
#[derive(Debug, Clone)]
pub struct BrushSelector {
    scheme: StateScheme,
    selected: ScheduleState,
    /// Entries as last drawn, for hit-testing.
    entries: Vec<(Rect, ScheduleState)>,
}

impl BrushSelector {
    /// Creates a selector on the scheme's default brush.
    #[must_use]
    pub fn new(scheme: StateScheme) -> Self {
        let selected = scheme.default_brush();
        Self {
            scheme,
            selected,
            entries: Vec::new(),
        }
    }

    /// Returns the selected state.
    #[must_use]
    pub fn brush(&self) -> ScheduleState {
        self.selected
    }

    /// Selects a state. Returns `false` if the scheme does not contain it.
    pub fn select(&mut self, state: ScheduleState) -> bool {
        if self.scheme.descriptor(state).is_none() {
            return false;
        }
        self.selected = state;
        true
    }

    /// Selects the next state of the scheme, wrapping around.
    pub fn next(&mut self) {
        let len = self.scheme.len();
        if len == 0 {
            return;
        }
        let next = self
            .scheme
            .position(self.selected)
            .map_or(0, |i| (i + 1) % len);
        if let Some(descriptor) = self.scheme.get(next) {
            self.selected = descriptor.state;
        }
    }

    /// Returns the legend entry under the coordinates, as last drawn.
    #[must_use]
    pub fn state_at(&self, column: u16, row: u16) -> Option<ScheduleState> {
        self.entries
            .iter()
            .find(|(rect, _)| {
                row == rect.y && column >= rect.x && column < rect.x + rect.width
            })
            .map(|(_, state)| *state)
    }

    /// Draws the legend on one row: a swatch, the key and the name per state.
    ///
    /// The selected entry is highlighted.
    pub fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        self.entries.clear();
        if area.height == 0 {
            return;
        }

        let mut x = area.x;
        for (key, descriptor) in (1..).zip(self.scheme.iter()) {
            let label = format!(" {key} {} ", descriptor.name());
            let width = 2 + u16::try_from(label.len()).unwrap_or(u16::MAX);
            if x + width > area.right() {
                break;
            }

            let swatch = state_style(&self.scheme, descriptor.state);
            buf.set_string(x, area.y, "  ", swatch);

            let mut label_style = Style::default().fg(Color::Gray);
            if descriptor.state == self.selected {
                label_style = Style::default()
                    .fg(Color::Black)
                    .bg(to_color(descriptor.border))
                    .add_modifier(Modifier::BOLD);
            }
            buf.set_string(x + 2, area.y, &label, label_style);

            self.entries
                .push((Rect::new(x, area.y, width, 1), descriptor.state));
            x += width + ENTRY_GAP;
        }
    }
}
