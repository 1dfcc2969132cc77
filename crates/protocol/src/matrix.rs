//! The serializable schedule matrix.
//!
//! The schedule crosses the service boundary as a plain 24×7 matrix of state
//! integers, indexed `[hour][day]` with days in Monday-first order. This is
//! the only bit-exact contract between the grid and the configuration
//! service.
//!
//! ```text
//!            Mon Tue Wed Thu Fri Sat Sun
//! hour  0 [  0,  0,  0,  0,  0,  2,  2 ]
//! hour  1 [  0,  0,  0,  0,  0,  2,  2 ]
//! ...
//! hour 23 [  1,  1,  1,  1,  1,  1,  1 ]
//! ```
//!
//! Conversion from untyped rows is validated: a matrix with the wrong shape
//! or an unknown state value is rejected instead of being loaded partially.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::grid::{DAYS_PER_WEEK, Grid, HOURS_PER_DAY, Weekday};
use crate::state::ScheduleState;

/// A validated 24×7 schedule matrix.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{Grid, ScheduleMatrix, ScheduleState, Weekday};
///
/// let mut matrix = ScheduleMatrix::default();
/// matrix.set(Weekday::Tue, 8, ScheduleState::Paused);
///
/// let mut grid = Grid::default();
/// grid.apply_matrix(&matrix);
/// assert_eq!(grid.to_matrix(), matrix);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<u8>>")]
pub struct ScheduleMatrix {
    rows: [[ScheduleState; DAYS_PER_WEEK]; HOURS_PER_DAY],
}

impl Default for ScheduleMatrix {
    fn default() -> Self {
        Self::filled(ScheduleState::default())
    }
}

impl ScheduleMatrix {
    /// Creates a matrix with every slot set to `state`.
    #[must_use]
    pub fn filled(state: ScheduleState) -> Self {
        Self {
            rows: [[state; DAYS_PER_WEEK]; HOURS_PER_DAY],
        }
    }

    /// Returns the state of one slot; the hour is clamped to `0..=23`.
    #[must_use]
    pub fn get(&self, day: Weekday, hour: u8) -> ScheduleState {
        self.rows[usize::from(hour).min(HOURS_PER_DAY - 1)][day.index()]
    }

    /// Sets the state of one slot; the hour is clamped to `0..=23`.
    pub fn set(&mut self, day: Weekday, hour: u8, state: ScheduleState) {
        self.rows[usize::from(hour).min(HOURS_PER_DAY - 1)][day.index()] = state;
    }

    /// Returns the raw hour-major rows.
    #[must_use]
    pub fn rows(&self) -> &[[ScheduleState; DAYS_PER_WEEK]; HOURS_PER_DAY] {
        &self.rows
    }

    /// Builds a matrix from untyped hour-major rows.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidMatrix`] if there are not exactly 24
    /// rows of exactly 7 entries, or if an entry is not a known state value.
    ///
    /// # Examples
    ///
    /// ```
    /// use hourglass_protocol::ScheduleMatrix;
    ///
    /// let rows = vec![vec![0_i64; 7]; 24];
    /// assert!(ScheduleMatrix::from_rows(&rows).is_ok());
    ///
    /// let short = vec![vec![0_i64; 7]; 23];
    /// assert!(ScheduleMatrix::from_rows(&short).is_err());
    /// ```
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self> {
        if rows.len() != HOURS_PER_DAY {
            return Err(ProtocolError::InvalidMatrix {
                reason: format!("expected {HOURS_PER_DAY} hour rows, found {}", rows.len()),
            });
        }

        let mut matrix = Self::default();
        for (hour, row) in rows.iter().enumerate() {
            if row.len() != DAYS_PER_WEEK {
                return Err(ProtocolError::InvalidMatrix {
                    reason: format!(
                        "hour {hour}: expected {DAYS_PER_WEEK} day columns, found {}",
                        row.len()
                    ),
                });
            }
            for (day, value) in row.iter().enumerate() {
                let state =
                    ScheduleState::from_wire(*value).map_err(|_| ProtocolError::InvalidMatrix {
                        reason: format!("hour {hour}, day {day}: unknown state value {value}"),
                    })?;
                matrix.rows[hour][day] = state;
            }
        }
        Ok(matrix)
    }

    /// Returns the matrix as untyped hour-major rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|s| s.value()).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<i64>>> for ScheduleMatrix {
    type Error = ProtocolError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<ScheduleMatrix> for Vec<Vec<u8>> {
    fn from(matrix: ScheduleMatrix) -> Self {
        matrix.to_rows()
    }
}

impl Grid {
    /// Serializes the displayed values into a matrix.
    #[must_use]
    pub fn to_matrix(&self) -> ScheduleMatrix {
        let mut matrix = ScheduleMatrix::default();
        for cell in self.cells() {
            matrix.set(cell.day, cell.hour, cell.current());
        }
        matrix
    }

    /// Loads a matrix, setting both displayed and committed values.
    ///
    /// Any pending preview is discarded.
    pub fn apply_matrix(&mut self, matrix: &ScheduleMatrix) {
        for day in Weekday::ALL {
            for hour in 0..HOURS_PER_DAY as u8 {
                self.load_cell(day, hour, matrix.get(day, hour));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn state_strategy() -> impl Strategy<Value = i64> {
        0_i64..=2
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
        prop::collection::vec(
            prop::collection::vec(state_strategy(), DAYS_PER_WEEK),
            HOURS_PER_DAY,
        )
    }

    proptest! {
        #[test]
        fn grid_round_trip(rows in rows_strategy()) {
            let matrix = ScheduleMatrix::from_rows(&rows).unwrap();
            let mut grid = Grid::default();
            grid.apply_matrix(&matrix);

            prop_assert!(grid.is_settled());
            prop_assert_eq!(grid.to_matrix(), matrix.clone());

            let wire: Vec<Vec<i64>> = grid
                .to_matrix()
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(i64::from).collect())
                .collect();
            prop_assert_eq!(wire, rows);
        }
    }

    #[test]
    fn matrix_is_hour_major() {
        let mut matrix = ScheduleMatrix::default();
        matrix.set(Weekday::Sun, 23, ScheduleState::Paused);
        let rows = matrix.to_rows();
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[23], vec![0, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let rows = vec![vec![0; 7]; 25];
        let err = ScheduleMatrix::from_rows(&rows).unwrap_err();
        assert!(err.to_string().contains("expected 24 hour rows"));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let mut rows = vec![vec![0; 7]; 24];
        rows[5] = vec![0; 6];
        let err = ScheduleMatrix::from_rows(&rows).unwrap_err();
        assert!(err.to_string().contains("hour 5"));
    }

    #[test]
    fn unknown_value_is_rejected() {
        let mut rows = vec![vec![0; 7]; 24];
        rows[0][3] = 9;
        assert!(matches!(
            ScheduleMatrix::from_rows(&rows),
            Err(ProtocolError::InvalidMatrix { .. })
        ));
    }

    #[test]
    fn json_shape() {
        let mut matrix = ScheduleMatrix::default();
        matrix.set(Weekday::Mon, 0, ScheduleState::Throttled);
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json[0][0], 1);
        assert_eq!(json.as_array().unwrap().len(), 24);

        let parsed: ScheduleMatrix = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, matrix);
    }

    #[test]
    fn apply_discards_previews() {
        let mut grid = Grid::default();
        grid.paint(Weekday::Thu, 4, ScheduleState::Paused);
        grid.apply_matrix(&ScheduleMatrix::default());
        assert!(grid.is_settled());
        assert_eq!(grid.cell(Weekday::Thu, 4).current(), ScheduleState::Normal);
    }
}
