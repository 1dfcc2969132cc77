//! The force-start toggle.
//!
//! Forced items ignore the paused state of the schedule. The toggle shows
//! whether every selected item is forced. Flipping it is optimistic: the new
//! value is shown at once, the request is sent, and the previous value is put
//! back if the request fails.

/// An outstanding force-start change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceChange {
    /// The value shown before the toggle.
    pub previous: bool,
    /// The value to request.
    pub value: bool,
}

/// The checkbox state of the force-start toggle.
///
/// # Examples
///
/// ```
/// use hourglass_tui::force::ForceStartToggle;
///
/// let mut toggle = ForceStartToggle::default();
/// toggle.refresh(&[true, true]);
/// assert!(toggle.is_checked());
///
/// let change = toggle.toggle();
/// assert!(!toggle.is_checked());
///
/// // the request failed
/// toggle.resolve(change, false);
/// assert!(toggle.is_checked());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForceStartToggle {
    checked: bool,
    /// Number of changes sent but not yet resolved.
    in_flight: usize,
}

impl ForceStartToggle {
    /// Returns the shown value.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Returns `true` while a change is awaiting its result.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Shows the forced flags of the selected items.
    ///
    /// Checked only if there is a selection and every item in it is forced.
    pub fn refresh(&mut self, flags: &[bool]) {
        self.checked = !flags.is_empty() && flags.iter().all(|forced| *forced);
    }

    /// Flips the shown value and returns the change to request.
    pub fn toggle(&mut self) -> ForceChange {
        let change = ForceChange {
            previous: self.checked,
            value: !self.checked,
        };
        self.checked = change.value;
        self.in_flight += 1;
        change
    }

    /// Records the outcome of a change; a failure puts the previous value
    /// back.
    pub fn resolve(&mut self, change: ForceChange, succeeded: bool) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if !succeeded {
            self.checked = change.previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_requires_every_item_forced() {
        let mut toggle = ForceStartToggle::default();
        toggle.refresh(&[true, false]);
        assert!(!toggle.is_checked());
        toggle.refresh(&[true]);
        assert!(toggle.is_checked());
        toggle.refresh(&[]);
        assert!(!toggle.is_checked());
    }

    #[test]
    fn toggle_applies_locally_before_the_result() {
        let mut toggle = ForceStartToggle::default();
        let change = toggle.toggle();
        assert_eq!(
            change,
            ForceChange {
                previous: false,
                value: true
            }
        );
        assert!(toggle.is_checked());
        assert!(toggle.is_pending());

        toggle.resolve(change, true);
        assert!(toggle.is_checked());
        assert!(!toggle.is_pending());
    }

    #[test]
    fn failed_change_restores_the_previous_value() {
        let mut toggle = ForceStartToggle::default();
        toggle.refresh(&[true]);
        let change = toggle.toggle();
        assert!(!toggle.is_checked());

        toggle.resolve(change, false);
        assert!(toggle.is_checked());
        assert!(!toggle.is_pending());
    }
}
