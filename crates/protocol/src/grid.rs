//! The weekly schedule grid.
//!
//! The grid has a fixed shape of 7 days × 24 hours. Every [`Cell`] carries
//! the value currently shown (which may be a preview) and the last value the
//! user confirmed. The grid only offers pure data operations; pointer
//! handling lives in the TUI crate.

use serde::{Deserialize, Serialize};

use crate::state::ScheduleState;

/// Number of hour slots in a day.
pub const HOURS_PER_DAY: usize = 24;

/// Number of days in the grid.
pub const DAYS_PER_WEEK: usize = 7;

/// The last valid hour index.
pub const LAST_HOUR: u8 = 23;

/// A day of the week, in the grid's fixed Monday-first order.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::Weekday;
///
/// assert_eq!(Weekday::Mon.index(), 0);
/// assert_eq!(Weekday::Sun.label(), "Sun");
/// assert_eq!(Weekday::from_index(2), Some(Weekday::Wed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl Weekday {
    /// All days in grid order.
    pub const ALL: [Self; DAYS_PER_WEEK] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    /// Returns the zero-based position of the day (Monday is 0).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the day at a zero-based position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the short label shown at the start of the day's row.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The position of a cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    /// The day (row).
    pub day: Weekday,
    /// The hour (column), always in `0..=23`.
    pub hour: u8,
}

impl CellPos {
    /// Creates a position, clamping the hour to the last valid slot.
    #[must_use]
    pub fn new(day: Weekday, hour: u8) -> Self {
        Self {
            day,
            hour: hour.min(LAST_HOUR),
        }
    }
}

/// An inclusive range of hours on one day.
///
/// Ranges are order-independent and always clamped to `0..=23`.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::HourRange;
///
/// let range = HourRange::between(20, 15);
/// assert_eq!((range.lo(), range.hi()), (15, 20));
/// assert!(range.contains(17));
///
/// // Out-of-bounds upper bounds are clamped, never rejected.
/// assert_eq!(HourRange::between(3, 40).hi(), 23);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    lo: u8,
    hi: u8,
}

impl HourRange {
    /// The whole day.
    pub const FULL_DAY: Self = Self { lo: 0, hi: LAST_HOUR };

    /// Creates the range spanning two hours, in either order.
    #[must_use]
    pub fn between(a: u8, b: u8) -> Self {
        let (a, b) = (a.min(LAST_HOUR), b.min(LAST_HOUR));
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// A single-hour range.
    #[must_use]
    pub fn single(hour: u8) -> Self {
        Self::between(hour, hour)
    }

    /// The lower bound.
    #[must_use]
    pub const fn lo(self) -> u8 {
        self.lo
    }

    /// The upper bound.
    #[must_use]
    pub const fn hi(self) -> u8 {
        self.hi
    }

    /// Returns `true` if the hour lies inside the range.
    #[must_use]
    pub const fn contains(self, hour: u8) -> bool {
        self.lo <= hour && hour <= self.hi
    }

    /// Iterates the hours in the range.
    pub fn hours(self) -> impl Iterator<Item = u8> {
        self.lo..=self.hi
    }
}

/// One (day, hour) slot of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The day this cell belongs to.
    pub day: Weekday,
    /// The hour of this cell.
    pub hour: u8,
    current: ScheduleState,
    committed: ScheduleState,
}

impl Cell {
    fn new(day: Weekday, hour: u8, value: ScheduleState) -> Self {
        Self {
            day,
            hour,
            current: value,
            committed: value,
        }
    }

    /// The value currently displayed, possibly a preview.
    #[must_use]
    pub const fn current(&self) -> ScheduleState {
        self.current
    }

    /// The last value the user confirmed.
    #[must_use]
    pub const fn committed(&self) -> ScheduleState {
        self.committed
    }

    /// Returns `true` while a preview differs from the committed value.
    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.current != self.committed
    }

    /// Returns the position of this cell.
    #[must_use]
    pub fn pos(&self) -> CellPos {
        CellPos {
            day: self.day,
            hour: self.hour,
        }
    }
}

/// The 7×24 cell store.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{Grid, ScheduleState, Weekday};
///
/// let mut grid = Grid::default();
/// grid.paint(Weekday::Wed, 5, ScheduleState::Throttled);
/// assert!(grid.cell(Weekday::Wed, 5).is_previewing());
///
/// grid.revert_cell(Weekday::Wed, 5);
/// assert_eq!(grid.cell(Weekday::Wed, 5).current(), ScheduleState::Normal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    days: [[Cell; HOURS_PER_DAY]; DAYS_PER_WEEK],
}

impl Default for Grid {
    fn default() -> Self {
        Self::filled(ScheduleState::default())
    }
}

impl Grid {
    /// Creates a grid with every cell holding `value`, both shown and committed.
    #[must_use]
    pub fn filled(value: ScheduleState) -> Self {
        let days = std::array::from_fn(|d| {
            let day = Weekday::ALL[d];
            std::array::from_fn(|h| Cell::new(day, h as u8, value))
        });
        Self { days }
    }

    fn slot(&self, day: Weekday, hour: u8) -> &Cell {
        &self.days[day.index()][usize::from(hour.min(LAST_HOUR))]
    }

    fn slot_mut(&mut self, day: Weekday, hour: u8) -> &mut Cell {
        &mut self.days[day.index()][usize::from(hour.min(LAST_HOUR))]
    }

    /// Returns the cell at `(day, hour)`; the hour is clamped to `0..=23`.
    #[must_use]
    pub fn cell(&self, day: Weekday, hour: u8) -> &Cell {
        self.slot(day, hour)
    }

    /// Returns the 24 cells of one day, indexed by hour.
    #[must_use]
    pub fn day(&self, day: Weekday) -> &[Cell; HOURS_PER_DAY] {
        &self.days[day.index()]
    }

    /// Iterates all 168 cells, day by day.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.days.iter().flatten()
    }

    /// Sets the displayed value of a cell.
    pub fn paint(&mut self, day: Weekday, hour: u8, value: ScheduleState) {
        self.slot_mut(day, hour).current = value;
    }

    /// Restores a cell's displayed value from its committed value.
    pub fn revert_cell(&mut self, day: Weekday, hour: u8) {
        let cell = self.slot_mut(day, hour);
        cell.current = cell.committed;
    }

    /// Makes a cell's displayed value its committed value.
    pub fn commit_cell(&mut self, day: Weekday, hour: u8) {
        let cell = self.slot_mut(day, hour);
        cell.committed = cell.current;
    }

    /// Sets both the displayed and the committed value of a cell.
    pub fn load_cell(&mut self, day: Weekday, hour: u8, value: ScheduleState) {
        let cell = self.slot_mut(day, hour);
        cell.current = value;
        cell.committed = value;
    }

    /// Paints every hour of `range` on `day`.
    pub fn paint_range(&mut self, day: Weekday, range: HourRange, value: ScheduleState) {
        for hour in range.hours() {
            self.paint(day, hour, value);
        }
    }

    /// Reverts every hour of `range` on `day`.
    pub fn revert_range(&mut self, day: Weekday, range: HourRange) {
        for hour in range.hours() {
            self.revert_cell(day, hour);
        }
    }

    /// Reverts every hour of `day` that lies outside `range`.
    pub fn revert_outside(&mut self, day: Weekday, range: HourRange) {
        for hour in HourRange::FULL_DAY.hours().filter(|h| !range.contains(*h)) {
            self.revert_cell(day, hour);
        }
    }

    /// Commits every hour of `range` on `day` whose value changed.
    ///
    /// Returns the number of cells whose committed value moved.
    pub fn commit_range(&mut self, day: Weekday, range: HourRange) -> usize {
        let mut changed = 0;
        for hour in range.hours() {
            if self.slot(day, hour).is_previewing() {
                self.commit_cell(day, hour);
                changed += 1;
            }
        }
        changed
    }

    /// Reverts every cell of every day.
    pub fn revert_all(&mut self) {
        for day in Weekday::ALL {
            self.revert_range(day, HourRange::FULL_DAY);
        }
    }

    /// Returns `true` if no cell has a pending preview.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cells().all(|c| !c.is_previewing())
    }
}
