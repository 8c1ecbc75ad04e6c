//! Falling-edge detection for the four control buttons.
//!
//! Buttons are pulled up and read low while pressed. A press is a single
//! high-to-low transition between two consecutive ticks. There is no further
//! filtering; the tick period is long enough to ride over contact bounce.

use crate::types::Button;

/// Input levels of all four buttons sampled on one tick.
///
/// A set bit means the input reads high (released).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels(u8);

impl ButtonLevels {
    /// All four inputs at their resting high level.
    pub const RELEASED: Self = Self(0b1111);

    /// Builds levels from raw pin reads, `true` meaning the pin is high.
    pub const fn from_pins(start_pause: bool, reset: bool, speed_up: bool, speed_down: bool) -> Self {
        Self(
            (start_pause as u8)
                | (reset as u8) << 1
                | (speed_up as u8) << 2
                | (speed_down as u8) << 3,
        )
    }

    /// Levels with exactly the given buttons held down.
    pub fn pressed(buttons: &[Button]) -> Self {
        buttons
            .iter()
            .fold(Self::RELEASED, |levels, &button| levels.with_pressed(button))
    }

    /// Returns a copy with `button` held down.
    pub const fn with_pressed(self, button: Button) -> Self {
        Self(self.0 & !Self::mask(button))
    }

    /// Whether `button` reads high.
    #[inline]
    pub const fn is_high(self, button: Button) -> bool {
        self.0 & Self::mask(button) != 0
    }

    const fn mask(button: Button) -> u8 {
        1 << button.rank()
    }
}

impl Default for ButtonLevels {
    fn default() -> Self {
        Self::RELEASED
    }
}

/// Last observed level of each button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    last: ButtonLevels,
}

impl ButtonState {
    /// All buttons at rest.
    pub const fn new() -> Self {
        Self {
            last: ButtonLevels::RELEASED,
        }
    }

    /// Levels seen on the previous tick.
    pub fn last_levels(&self) -> ButtonLevels {
        self.last
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns per-tick samples into prioritized press events.
#[derive(Debug, Default)]
pub struct ButtonDebouncer {
    state: ButtonState,
}

impl ButtonDebouncer {
    /// Creates a debouncer with every button at rest.
    pub const fn new() -> Self {
        Self {
            state: ButtonState::new(),
        }
    }

    /// Samples one tick and returns the highest-priority press, if any.
    ///
    /// Every button's level is remembered whether or not its edge was
    /// reported, so a lower-ranked press that loses to a higher-ranked one on
    /// the same tick is dropped, not deferred.
    pub fn sample(&mut self, levels: ButtonLevels) -> Option<Button> {
        let last = self.state.last;
        self.state.last = levels;

        Button::PRIORITY
            .into_iter()
            .find(|&button| last.is_high(button) && !levels.is_high(button))
    }

    /// Current remembered levels.
    pub fn state(&self) -> &ButtonState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_reports_once_per_falling_edge() {
        let mut debouncer = ButtonDebouncer::new();
        let down = ButtonLevels::pressed(&[Button::SpeedUp]);

        assert_eq!(debouncer.sample(down), Some(Button::SpeedUp));
        // Held: no new edge.
        assert_eq!(debouncer.sample(down), None);
        assert_eq!(debouncer.sample(ButtonLevels::RELEASED), None);
        assert_eq!(debouncer.sample(down), Some(Button::SpeedUp));
    }

    #[test]
    fn simultaneous_presses_resolve_by_priority() {
        let mut debouncer = ButtonDebouncer::new();
        let levels = ButtonLevels::pressed(&[Button::SpeedDown, Button::Reset, Button::SpeedUp]);

        assert_eq!(debouncer.sample(levels), Some(Button::Reset));
        // The losers were recorded as low, so their edges are gone.
        assert_eq!(debouncer.sample(levels), None);
        assert_eq!(debouncer.state().last_levels(), levels);
    }

    #[test]
    fn from_pins_matches_pressed() {
        assert_eq!(
            ButtonLevels::from_pins(true, false, true, true),
            ButtonLevels::pressed(&[Button::Reset])
        );
        assert_eq!(ButtonLevels::from_pins(true, true, true, true), ButtonLevels::RELEASED);
    }

    #[test]
    fn rising_edge_is_not_a_press() {
        let mut debouncer = ButtonDebouncer::new();
        debouncer.sample(ButtonLevels::pressed(&[Button::StartPause]));
        assert_eq!(debouncer.sample(ButtonLevels::RELEASED), None);
        assert!(debouncer.state().last_levels().is_high(Button::StartPause));
    }
}
