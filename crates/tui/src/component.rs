//! The renderable component interface.

use ratatui::{buffer::Buffer, layout::Rect};

/// Something that draws itself into an area of the frame.
///
/// Components may remember where they were drawn so that later pointer
/// events can be hit-tested against that layout.
pub trait Component {
    /// Draws the component into `area`.
    fn render(&mut self, area: Rect, buf: &mut Buffer);
}
