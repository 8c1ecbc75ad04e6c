//! Core types shared by the score, the handlers and the controller.

/// A single score entry: how high and how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Timer ticks between output toggles. Sets the pitch.
    pub half_period: u16,

    /// Note length in duration units. One unit is two ticks at tempo scale 1.0.
    pub duration: u16,
}

impl Note {
    /// Creates a new score entry.
    #[inline]
    pub const fn new(half_period: u16, duration: u16) -> Self {
        Self {
            half_period,
            duration,
        }
    }
}

/// Which of the two embedded scores is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Song {
    /// First score. Selected at startup and after a full reset.
    #[default]
    A,

    /// Second score.
    B,
}

impl Song {
    /// Returns the other song.
    pub fn other(self) -> Self {
        match self {
            Song::A => Song::B,
            Song::B => Song::A,
        }
    }
}

/// The four control buttons, declared in press-priority order.
///
/// When several buttons show a falling edge on the same tick only the
/// highest-ranked one is acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Toggle audible output.
    StartPause,

    /// Full reset while playing, song switch while stopped.
    Reset,

    /// Shorten notes.
    SpeedUp,

    /// Lengthen notes.
    SpeedDown,
}

impl Button {
    /// All buttons, highest priority first.
    pub const PRIORITY: [Button; 4] = [
        Button::StartPause,
        Button::Reset,
        Button::SpeedUp,
        Button::SpeedDown,
    ];

    /// Position of this button in [`Button::PRIORITY`].
    #[inline]
    pub const fn rank(self) -> usize {
        self as usize
    }
}

/// Note-length multiplier, stored as integer tenths.
///
/// `TempoScale::from_tenths(10)` is 1.0. Larger values play slower. Keeping
/// the value in tenths means repeated speed steps land exactly on the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempoScale(u8);

impl TempoScale {
    /// Scale 1.0, the tempo written in the score.
    pub const NORMAL: Self = Self(10);

    /// Scale 0.1, the fastest allowed tempo.
    pub const MIN: Self = Self(1);

    /// Scale 5.0, the slowest allowed tempo.
    pub const MAX: Self = Self(50);

    /// Creates a scale from tenths (`15` is 1.5).
    #[inline]
    pub const fn from_tenths(tenths: u8) -> Self {
        Self(tenths)
    }

    /// Returns the scale in tenths.
    #[inline]
    pub const fn tenths(self) -> u8 {
        self.0
    }

    /// Returns the scale as a floating-point multiplier.
    #[inline]
    pub fn as_f32(self) -> f32 {
        self.0 as f32 / 10.0
    }

    /// Subtracts `step`, stopping at `floor`.
    pub fn decrease(self, step: Self, floor: Self) -> Self {
        Self(self.0.saturating_sub(step.0)).max(floor)
    }

    /// Adds `step`, stopping at `ceiling`.
    pub fn increase(self, step: Self, ceiling: Self) -> Self {
        Self(self.0.saturating_add(step.0)).min(ceiling)
    }

    /// Number of ticks a note of `duration` units lasts at this scale.
    ///
    /// Equals `2 * scale * duration`, rounded up so that the comparison
    /// `tempo_counter >= note_ticks` matches the real-valued threshold.
    #[inline]
    pub fn note_ticks(self, duration: u16) -> u32 {
        (2 * self.0 as u32 * duration as u32).div_ceil(10)
    }
}

impl Default for TempoScale {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Score validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScoreError {
    /// No notes provided.
    EmptyScore,

    /// A note would program a zero compare interval.
    ZeroHalfPeriod {
        /// Position of the offending note.
        index: usize,
    },
}

impl core::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScoreError::EmptyScore => {
                write!(f, "score must have at least one note")
            }
            ScoreError::ZeroHalfPeriod { index } => {
                write!(f, "note {} has a zero half-period", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ScoreError {}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Minimum tempo scale is zero or above the maximum.
    InvalidTempoBounds,

    /// A tempo step of zero would make a speed button do nothing.
    ZeroTempoStep,

    /// The inter-note pause must last at least one tick.
    ZeroPauseLength,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidTempoBounds => {
                write!(f, "tempo bounds must satisfy 0 < min <= max")
            }
            ConfigError::ZeroTempoStep => {
                write!(f, "tempo steps must be non-zero")
            }
            ConfigError::ZeroPauseLength => {
                write!(f, "pause length must be at least one tick")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
