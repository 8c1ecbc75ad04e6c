//! Shared playback state.
//!
//! [`PlaybackState`] is written by both event handlers. Which fields each
//! handler may touch is fixed:
//!
//! | field            | timer compare | tick                 |
//! |------------------|---------------|----------------------|
//! | `active_song`    | -             | Reset                |
//! | `note_index`     | yes           | Reset                |
//! | `duration_index` | yes           | Reset                |
//! | `tempo_counter`  | yes           | yes                  |
//! | `tempo_scale`    | -             | Reset, SpeedUp/Down  |
//! | `half_period`    | yes           | Reset                |
//! | `sound_on`       | yes           | Start/Pause, Reset   |
//! | `pause_on`       | yes           | Reset                |
//!
//! Handlers never nest, so no field is ever observed mid-update.

use crate::config::SequencerConfig;
use crate::score::ScoreBook;
use crate::types::{Song, TempoScale};

/// Playback mode derived from the `sound_on` and `pause_on` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackMode {
    /// Silent and not in a gap. Progress is frozen.
    Stopped,
    /// A note is sounding.
    Playing,
    /// Silent gap between two notes.
    Gap,
}

/// Process-wide playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackState {
    pub(crate) active_song: Song,
    pub(crate) note_index: usize,
    pub(crate) duration_index: usize,
    pub(crate) tempo_counter: u32,
    pub(crate) tempo_scale: TempoScale,
    pub(crate) half_period: u16,
    pub(crate) sound_on: bool,
    pub(crate) pause_on: bool,
}

impl PlaybackState {
    /// Startup state: stopped at the first note of the configured song.
    pub fn new(scores: &ScoreBook, config: &SequencerConfig) -> Self {
        let song = config.initial_song;
        Self {
            active_song: song,
            note_index: 0,
            duration_index: 0,
            tempo_counter: 0,
            tempo_scale: config.reset_scale(),
            half_period: scores.score(song).half_period(0),
            sound_on: false,
            pause_on: false,
        }
    }

    /// Returns the state to its startup values.
    pub(crate) fn reset(&mut self, scores: &ScoreBook, config: &SequencerConfig) {
        *self = Self::new(scores, config);
    }

    /// Current mode. A gap wins over `sound_on` because the gap length still
    /// governs when the next note starts.
    pub fn mode(&self) -> PlaybackMode {
        if self.pause_on {
            PlaybackMode::Gap
        } else if self.sound_on {
            PlaybackMode::Playing
        } else {
            PlaybackMode::Stopped
        }
    }

    /// True while the tempo counter advances.
    #[inline]
    pub fn is_progressing(&self) -> bool {
        self.sound_on || self.pause_on
    }

    /// Song whose pitch table is in use.
    pub fn active_song(&self) -> Song {
        self.active_song
    }

    /// Index of the current pitch in the active score.
    pub fn note_index(&self) -> usize {
        self.note_index
    }

    /// Index of the current duration in the active score.
    pub fn duration_index(&self) -> usize {
        self.duration_index
    }

    /// Ticks since the last note transition or gap start.
    pub fn tempo_counter(&self) -> u32 {
        self.tempo_counter
    }

    /// Current note-length multiplier.
    pub fn tempo_scale(&self) -> TempoScale {
        self.tempo_scale
    }

    /// Compare interval programmed on the next timer event.
    pub fn half_period(&self) -> u16 {
        self.half_period
    }

    /// Whether the output toggles.
    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    /// Whether the inter-note gap is running.
    pub fn pause_on(&self) -> bool {
        self.pause_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Score;
    use crate::types::Note;

    const A: [Note; 2] = [Note::new(100, 5), Note::new(200, 5)];
    const B: [Note; 1] = [Note::new(300, 5)];

    fn book() -> ScoreBook {
        ScoreBook::new(Score::new(&A), Score::new(&B))
    }

    #[test]
    fn starts_stopped_on_first_note_of_initial_song() {
        let state = PlaybackState::new(&book(), &SequencerConfig::default());
        assert_eq!(state.mode(), PlaybackMode::Stopped);
        assert_eq!(state.active_song(), Song::A);
        assert_eq!(state.half_period(), 100);
        assert_eq!(state.tempo_scale(), TempoScale::NORMAL);
        assert!(!state.is_progressing());
    }

    #[test]
    fn initial_song_comes_from_config() {
        let config = SequencerConfig::new().with_initial_song(Song::B);
        let state = PlaybackState::new(&book(), &config);
        assert_eq!(state.active_song(), Song::B);
        assert_eq!(state.half_period(), 300);
    }

    #[test]
    fn mode_follows_flags() {
        let mut state = PlaybackState::new(&book(), &SequencerConfig::default());
        state.sound_on = true;
        assert_eq!(state.mode(), PlaybackMode::Playing);
        state.sound_on = false;
        state.pause_on = true;
        assert_eq!(state.mode(), PlaybackMode::Gap);
    }
}
