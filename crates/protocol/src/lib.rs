//! Shared protocol types for the hourglass application.
//!
//! This crate defines the data model shared by every hourglass component:
//! the schedule states, the weekly grid of cells, the matrix the grid is
//! persisted as, and the configuration record exchanged with the service.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`state`]: Schedule states and the state scheme (names, colors, brush)
//! - [`grid`]: Weekdays, cells, hour ranges and the 7×24 cell store
//! - [`matrix`]: The validated 24×7 wire matrix and grid conversion
//! - [`record`]: The scheduler configuration record
//! - [`item`]: Identifiers for scheduled items
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Painting and committing a slot, then exporting the schedule:
//!
//! ```
//! use hourglass_protocol::{Grid, ScheduleState, Weekday};
//!
//! let mut grid = Grid::default();
//! grid.paint(Weekday::Mon, 9, ScheduleState::Throttled);
//! grid.commit_cell(Weekday::Mon, 9);
//!
//! let matrix = grid.to_matrix();
//! assert_eq!(matrix.get(Weekday::Mon, 9), ScheduleState::Throttled);
//! ```

pub mod error;
pub mod grid;
pub mod item;
pub mod matrix;
pub mod message;
pub mod record;
pub mod state;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use grid::{
    Cell, CellPos, DAYS_PER_WEEK, Grid, HOURS_PER_DAY, HourRange, LAST_HOUR, Weekday,
};
pub use item::ItemId;
pub use matrix::ScheduleMatrix;
pub use message::Message;
pub use record::{MAX_LIMIT, MIN_LIMIT, SchedulerConfig, UNLIMITED};
pub use state::{Rgb, ScheduleState, StateDescriptor, StateScheme, StateValue};
