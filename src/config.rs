//! Tunable playback constants.

use crate::types::{ConfigError, Song, TempoScale};

/// Playback constants applied by the tone handler and the controller.
///
/// [`SequencerConfig::default`] reproduces the reference firmware: a five-tick
/// gap between notes, SpeedUp steps of 0.1, SpeedDown steps of 0.2, and a
/// tempo scale bounded to 0.1..=5.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerConfig {
    /// Length of the silent gap between notes, in ticks.
    pub pause_ticks: u16,

    /// Amount SpeedUp subtracts from the tempo scale.
    pub speed_up_step: TempoScale,

    /// Amount SpeedDown adds to the tempo scale.
    pub slow_down_step: TempoScale,

    /// Fastest allowed tempo scale.
    pub min_scale: TempoScale,

    /// Slowest allowed tempo scale.
    pub max_scale: TempoScale,

    /// Song selected at startup and after a full reset.
    pub initial_song: Song,
}

impl SequencerConfig {
    /// Default constants.
    pub const fn new() -> Self {
        Self {
            pause_ticks: 5,
            speed_up_step: TempoScale::from_tenths(1),
            slow_down_step: TempoScale::from_tenths(2),
            min_scale: TempoScale::MIN,
            max_scale: TempoScale::MAX,
            initial_song: Song::A,
        }
    }

    /// Sets the inter-note pause length.
    pub const fn with_pause_ticks(mut self, ticks: u16) -> Self {
        self.pause_ticks = ticks;
        self
    }

    /// Sets the SpeedUp and SpeedDown step sizes.
    pub const fn with_tempo_steps(mut self, speed_up: TempoScale, slow_down: TempoScale) -> Self {
        self.speed_up_step = speed_up;
        self.slow_down_step = slow_down;
        self
    }

    /// Sets the tempo scale bounds.
    pub const fn with_tempo_bounds(mut self, min: TempoScale, max: TempoScale) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Sets the song selected at startup and after reset.
    pub const fn with_initial_song(mut self, song: Song) -> Self {
        self.initial_song = song;
        self
    }

    /// Checks that the constants describe a usable sequencer.
    ///
    /// # Errors
    /// * `InvalidTempoBounds` - `min_scale` is zero or above `max_scale`
    /// * `ZeroTempoStep` - either speed step is zero
    /// * `ZeroPauseLength` - `pause_ticks` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_scale.tenths() == 0 || self.min_scale > self.max_scale {
            return Err(ConfigError::InvalidTempoBounds);
        }
        if self.speed_up_step.tenths() == 0 || self.slow_down_step.tenths() == 0 {
            return Err(ConfigError::ZeroTempoStep);
        }
        if self.pause_ticks == 0 {
            return Err(ConfigError::ZeroPauseLength);
        }
        Ok(())
    }

    /// Tempo scale restored by a full reset, clamped into the configured bounds.
    pub fn reset_scale(&self) -> TempoScale {
        TempoScale::NORMAL.max(self.min_scale).min(self.max_scale)
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::new()
    }
}
