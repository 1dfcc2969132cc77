//! Widget components for the hourglass TUI.
//!
//! This module provides the rendering functions for the panels around the
//! schedule grid. Each widget is a function that renders state to a buffer,
//! which keeps them easy to test and compose.
//!
//! # Modules
//!
//! - [`form`]: Renders the throttled-limits form
//! - [`help`]: Renders the help overlay
//! - [`status_bar`]: Renders the force-start line and the status line
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use hourglass_tui::form_state::LimitsForm;
//! use hourglass_tui::widgets;
//!
//! let area = Rect::new(0, 0, 80, 10);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_limits_form(&LimitsForm::default(), area, &mut buf);
//! ```

pub mod form;
pub mod help;
pub mod status_bar;

// Re-export primary rendering functions for convenience
pub use form::render_limits_form;
pub use help::render_help_overlay;
pub use status_bar::{Footer, StatusMessage, render_status_bar};
