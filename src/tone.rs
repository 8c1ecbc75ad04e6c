//! Square-wave tone generation driven by timer compare events.
//!
//! [`ToneGenerator::on_compare`] runs once per compare match. It schedules
//! the next edge, advances the score when the current note has lasted long
//! enough, inserts the fixed gap between notes, and finally tells the
//! hardware whether the output should toggle.

use crate::config::SequencerConfig;
use crate::score::{Score, ScoreBook};
use crate::state::PlaybackState;

/// Trait for abstracting the tone timer channel.
///
/// Implement this for the compare channel that drives the tone pin. Both
/// methods are called from interrupt context and must not block.
pub trait ToneOutput {
    /// Schedules the next compare match `ticks` timer ticks from now.
    fn set_compare_interval(&mut self, ticks: u16);

    /// Applies the compare output mode.
    ///
    /// With `toggle` set the pin toggles on every compare match, producing a
    /// 50% square wave. Otherwise the pin holds its level. The compare
    /// interrupt stays enabled either way.
    fn set_toggle(&mut self, toggle: bool);
}

/// What a compare event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneEvent {
    /// Nothing beyond rescheduling the next edge.
    Idle,
    /// Moved to the note at `index` and started the gap before it.
    NoteAdvanced {
        /// Index of the newly loaded note.
        index: usize,
    },
    /// The gap ended and the current note started sounding.
    GapEnded,
    /// The last note finished. Playback stopped on the first note.
    SongCompleted,
}

/// Output frequency in hertz for a half-period at the given timer clock.
#[inline]
pub fn frequency_hz(half_period: u16, timer_hz: u32) -> u32 {
    if half_period == 0 {
        return 0;
    }
    timer_hz / (2 * half_period as u32)
}

/// Compare-event handler state.
#[derive(Debug, Default)]
pub struct ToneGenerator {
    compare_events: u32,
}

impl ToneGenerator {
    /// Creates a handler with a zeroed event counter.
    pub const fn new() -> Self {
        Self { compare_events: 0 }
    }

    /// Number of compare events handled. Wraps on overflow.
    pub fn compare_events(&self) -> u32 {
        self.compare_events
    }

    /// Handles one timer compare match.
    ///
    /// The compare interval is reprogrammed before anything else so the
    /// waveform phase does not depend on how long the rest takes.
    pub fn on_compare<T: ToneOutput>(
        &mut self,
        state: &mut PlaybackState,
        scores: &ScoreBook,
        config: &SequencerConfig,
        output: &mut T,
    ) -> ToneEvent {
        self.compare_events = self.compare_events.wrapping_add(1);
        output.set_compare_interval(state.half_period);

        let score = scores.score(state.active_song);
        wrap_cursor(state, score);

        let note_ticks = state
            .tempo_scale
            .note_ticks(score.note(state.duration_index).duration);

        let event = if state.sound_on && state.tempo_counter >= note_ticks {
            advance_note(state, score)
        } else if state.pause_on && state.tempo_counter >= config.pause_ticks as u32 {
            state.pause_on = false;
            state.tempo_counter = 0;
            state.sound_on = true;
            ToneEvent::GapEnded
        } else {
            ToneEvent::Idle
        };

        output.set_toggle(state.sound_on);
        event
    }
}

/// Moves both indices to the next note and opens the gap before it.
///
/// Both indices always move together; running off the end of the score
/// wraps both to zero, reports completion and skips the trailing gap.
fn advance_note(state: &mut PlaybackState, score: &Score) -> ToneEvent {
    state.sound_on = false;
    state.pause_on = true;
    state.tempo_counter = 0;

    let next = state.duration_index + 1;
    if next >= score.len() {
        state.note_index = 0;
        state.duration_index = 0;
        state.pause_on = false;
        state.half_period = score.half_period(0);
        info!("song {} completed", state.active_song);
        return ToneEvent::SongCompleted;
    }

    state.note_index = next;
    state.duration_index = next;
    state.half_period = score.half_period(next);
    trace!("note {} half-period {}", next, state.half_period);
    ToneEvent::NoteAdvanced { index: next }
}

/// Pulls both indices back into the active score.
///
/// Runs on every compare event, not only on note transitions, so a stale
/// index can never reach a table read.
fn wrap_cursor(state: &mut PlaybackState, score: &Score) {
    debug_assert_eq!(state.note_index, state.duration_index);
    if state.note_index >= score.len() || state.duration_index >= score.len() {
        warn!("score index {} out of range, wrapping", state.duration_index);
        state.note_index = 0;
        state.duration_index = 0;
        state.half_period = score.half_period(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlaybackMode;
    use crate::types::{Note, Song, TempoScale};
    use heapless::Vec;

    const TWO: [Note; 2] = [Note::new(100, 5), Note::new(200, 5)];
    const THREE: [Note; 3] = [Note::new(300, 1), Note::new(400, 1), Note::new(500, 1)];

    #[derive(Default)]
    struct MockOutput {
        intervals: Vec<u16, 64>,
        toggles: Vec<bool, 64>,
    }

    impl ToneOutput for MockOutput {
        fn set_compare_interval(&mut self, ticks: u16) {
            let _ = self.intervals.push(ticks);
        }

        fn set_toggle(&mut self, toggle: bool) {
            let _ = self.toggles.push(toggle);
        }
    }

    fn setup() -> (ScoreBook, SequencerConfig, PlaybackState) {
        let book = ScoreBook::new(Score::new(&TWO), Score::new(&THREE));
        let config = SequencerConfig::default();
        let state = PlaybackState::new(&book, &config);
        (book, config, state)
    }

    #[test]
    fn stopped_state_only_reschedules() {
        let (book, config, mut state) = setup();
        let mut tone = ToneGenerator::new();
        let mut out = MockOutput::default();

        state.tempo_counter = 100;
        assert_eq!(tone.on_compare(&mut state, &book, &config, &mut out), ToneEvent::Idle);
        assert_eq!(out.intervals.as_slice(), &[100]);
        assert_eq!(out.toggles.as_slice(), &[false]);
        assert_eq!(tone.compare_events(), 1);
    }

    #[test]
    fn note_advances_once_scaled_length_elapses() {
        let (book, config, mut state) = setup();
        let mut tone = ToneGenerator::new();
        let mut out = MockOutput::default();
        state.sound_on = true;

        state.tempo_counter = 9;
        assert_eq!(tone.on_compare(&mut state, &book, &config, &mut out), ToneEvent::Idle);

        state.tempo_counter = 10;
        let event = tone.on_compare(&mut state, &book, &config, &mut out);
        assert_eq!(event, ToneEvent::NoteAdvanced { index: 1 });
        assert_eq!(state.half_period(), 200);
        assert_eq!(state.mode(), PlaybackMode::Gap);
        assert_eq!(state.tempo_counter(), 0);
        // The interval programmed on this event is still the old pitch.
        assert_eq!(out.intervals.last(), Some(&100));
        assert_eq!(out.toggles.last(), Some(&false));
    }

    #[test]
    fn tempo_scale_stretches_note_length() {
        let (book, config, mut state) = setup();
        let mut tone = ToneGenerator::new();
        let mut out = MockOutput::default();
        state.sound_on = true;
        state.tempo_scale = TempoScale::from_tenths(20);

        state.tempo_counter = 19;
        assert_eq!(tone.on_compare(&mut state, &book, &config, &mut out), ToneEvent::Idle);
        state.tempo_counter = 20;
        assert_eq!(
            tone.on_compare(&mut state, &book, &config, &mut out),
            ToneEvent::NoteAdvanced { index: 1 }
        );
    }

    #[test]
    fn gap_ends_after_pause_ticks() {
        let (book, config, mut state) = setup();
        let mut tone = ToneGenerator::new();
        let mut out = MockOutput::default();
        state.pause_on = true;

        state.tempo_counter = 4;
        assert_eq!(tone.on_compare(&mut state, &book, &config, &mut out), ToneEvent::Idle);
        state.tempo_counter = 5;
        assert_eq!(tone.on_compare(&mut state, &book, &config, &mut out), ToneEvent::GapEnded);
        assert_eq!(state.mode(), PlaybackMode::Playing);
        assert_eq!(state.tempo_counter(), 0);
        assert_eq!(out.toggles.last(), Some(&true));
    }

    #[test]
    fn last_note_completes_song_without_trailing_gap() {
        let (book, config, mut state) = setup();
        let mut tone = ToneGenerator::new();
        let mut out = MockOutput::default();
        state.sound_on = true;
        state.note_index = 1;
        state.duration_index = 1;
        state.half_period = 200;
        state.tempo_counter = 10;

        assert_eq!(
            tone.on_compare(&mut state, &book, &config, &mut out),
            ToneEvent::SongCompleted
        );
        assert_eq!(state.mode(), PlaybackMode::Stopped);
        assert_eq!(state.note_index(), 0);
        assert_eq!(state.duration_index(), 0);
        assert_eq!(state.half_period(), 100);
    }

    #[test]
    fn stale_index_is_wrapped_before_any_read() {
        let (book, config, mut state) = setup();
        let mut tone = ToneGenerator::new();
        let mut out = MockOutput::default();
        state.active_song = Song::A;
        state.note_index = 2;
        state.duration_index = 2;

        tone.on_compare(&mut state, &book, &config, &mut out);
        assert_eq!(state.note_index(), 0);
        assert_eq!(state.duration_index(), 0);
        assert_eq!(state.half_period(), 100);
    }

    #[test]
    fn frequency_matches_half_period() {
        assert_eq!(frequency_hz(1136, 1_000_000), 440);
        assert_eq!(frequency_hz(0, 1_000_000), 0);
    }
}
