//! Schedule states and the state scheme.
//!
//! A schedule slot holds one of a small, closed, ordered set of operating
//! states. The [`StateScheme`] pairs each state with its display name and
//! colors, and knows which state is the default paint brush.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// The integer a state is stored as on the wire.
pub type StateValue = u8;

/// The operating state of one schedule slot.
///
/// States are ordered `Normal < Throttled < Paused` and carry a stable
/// integer value that is used on the wire.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::ScheduleState;
///
/// assert_eq!(ScheduleState::Throttled.value(), 1);
/// assert!(ScheduleState::Normal < ScheduleState::Paused);
/// assert_eq!(ScheduleState::try_from(2).unwrap(), ScheduleState::Paused);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(into = "StateValue", try_from = "StateValue")]
pub enum ScheduleState {
    /// Full speed, no limits applied.
    #[default]
    Normal,
    /// The throttled limits apply.
    Throttled,
    /// Everything is paused.
    Paused,
}

impl ScheduleState {
    /// All states in order.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Throttled, Self::Paused];

    /// Returns the stable integer value of this state.
    #[must_use]
    pub const fn value(self) -> StateValue {
        match self {
            Self::Normal => 0,
            Self::Throttled => 1,
            Self::Paused => 2,
        }
    }

    /// Returns the display name of this state.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Throttled => "Throttled",
            Self::Paused => "Paused",
        }
    }

    /// Looks up a state from a wire integer of any width.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownState`] if the value is not a known state.
    pub fn from_wire(value: i64) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Throttled),
            2 => Ok(Self::Paused),
            other => Err(ProtocolError::UnknownState(other)),
        }
    }
}

impl From<ScheduleState> for StateValue {
    fn from(state: ScheduleState) -> Self {
        state.value()
    }
}

impl TryFrom<StateValue> for ScheduleState {
    type Error = ProtocolError;

    fn try_from(value: StateValue) -> Result<Self, Self::Error> {
        Self::from_wire(i64::from(value))
    }
}

impl std::fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An RGB color, kept free of any rendering library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Display attributes of one paintable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDescriptor {
    /// The state being described.
    pub state: ScheduleState,
    /// The fill color of a slot in this state.
    pub fill: Rgb,
    /// The accent color used for borders and the brush legend.
    pub border: Rgb,
}

impl StateDescriptor {
    /// Returns the display name of the described state.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.state.name()
    }
}

/// The fixed, ordered set of paintable states.
///
/// The first member is the value every slot starts with; the second member
/// is the default brush.
///
/// # Examples
///
/// ```
/// use hourglass_protocol::{ScheduleState, StateScheme};
///
/// let scheme = StateScheme::default();
/// assert_eq!(scheme.len(), 3);
/// assert_eq!(scheme.initial(), ScheduleState::Normal);
/// assert_eq!(scheme.default_brush(), ScheduleState::Throttled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateScheme {
    states: Vec<StateDescriptor>,
}

impl Default for StateScheme {
    fn default() -> Self {
        Self {
            states: vec![
                StateDescriptor {
                    state: ScheduleState::Normal,
                    // LightGreen / DarkGreen
                    fill: Rgb(144, 238, 144),
                    border: Rgb(0, 100, 0),
                },
                StateDescriptor {
                    state: ScheduleState::Throttled,
                    // Yellow / Gold
                    fill: Rgb(255, 255, 0),
                    border: Rgb(255, 215, 0),
                },
                StateDescriptor {
                    state: ScheduleState::Paused,
                    // OrangeRed / FireBrick
                    fill: Rgb(255, 69, 0),
                    border: Rgb(178, 34, 34),
                },
            ],
        }
    }
}

impl StateScheme {
    /// Returns the number of states in the scheme.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the scheme has no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates the state descriptors in order.
    pub fn iter(&self) -> impl Iterator<Item = &StateDescriptor> {
        self.states.iter()
    }

    /// Returns the descriptor at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StateDescriptor> {
        self.states.get(index)
    }

    /// Returns the descriptor for a state, if the scheme contains it.
    #[must_use]
    pub fn descriptor(&self, state: ScheduleState) -> Option<&StateDescriptor> {
        self.states.iter().find(|d| d.state == state)
    }

    /// Returns the position of a state in the scheme.
    #[must_use]
    pub fn position(&self, state: ScheduleState) -> Option<usize> {
        self.states.iter().position(|d| d.state == state)
    }

    /// The value every slot holds before anything is painted.
    #[must_use]
    pub fn initial(&self) -> ScheduleState {
        self.states.first().map_or_else(ScheduleState::default, |d| d.state)
    }

    /// The brush selected when the widget is first shown.
    #[must_use]
    pub fn default_brush(&self) -> ScheduleState {
        self.states
            .get(1)
            .or_else(|| self.states.first())
            .map_or_else(ScheduleState::default, |d| d.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_values_are_stable() {
        assert_eq!(ScheduleState::Normal.value(), 0);
        assert_eq!(ScheduleState::Throttled.value(), 1);
        assert_eq!(ScheduleState::Paused.value(), 2);
    }

    #[test]
    fn states_are_ordered() {
        let mut shuffled = vec![
            ScheduleState::Paused,
            ScheduleState::Normal,
            ScheduleState::Throttled,
        ];
        shuffled.sort();
        assert_eq!(shuffled, ScheduleState::ALL.to_vec());
    }

    #[test]
    fn unknown_wire_value_is_rejected() {
        assert!(matches!(
            ScheduleState::from_wire(3),
            Err(ProtocolError::UnknownState(3))
        ));
        assert!(ScheduleState::from_wire(-1).is_err());
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&ScheduleState::Paused).unwrap();
        assert_eq!(json, "2");
        let parsed: ScheduleState = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, ScheduleState::Throttled);
        assert!(serde_json::from_str::<ScheduleState>("7").is_err());
    }

    #[test]
    fn default_scheme_order_and_brush() {
        let scheme = StateScheme::default();
        let names: Vec<_> = scheme.iter().map(StateDescriptor::name).collect();
        assert_eq!(names, ["Normal", "Throttled", "Paused"]);
        assert_eq!(scheme.initial(), ScheduleState::Normal);
        assert_eq!(scheme.default_brush(), ScheduleState::Throttled);
        assert_eq!(scheme.position(ScheduleState::Paused), Some(2));
    }

    #[test]
    fn descriptor_colors() {
        let scheme = StateScheme::default();
        let paused = scheme.descriptor(ScheduleState::Paused).unwrap();
        assert_eq!(paused.fill, Rgb(255, 69, 0));
        assert_eq!(paused.border, Rgb(178, 34, 34));
    }
}
