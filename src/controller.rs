//! Playback control: applies one button press per tick to the shared state.

use crate::config::SequencerConfig;
use crate::score::ScoreBook;
use crate::state::PlaybackState;
use crate::types::{Button, Song, TempoScale};

/// What a button press changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    /// Output toggling was switched on or off.
    PlaybackToggled {
        /// New value of `sound_on`.
        sound_on: bool,
    },
    /// Everything went back to the startup state.
    Reset,
    /// The other song's pitch table was selected.
    SongSwitched(Song),
    /// Tempo scale changed (or was already at its bound).
    TempoChanged(TempoScale),
    /// Reset was pressed while stopped between note boundaries. Nothing changed.
    Ignored,
}

/// Applies button presses to [`PlaybackState`] and counts tempo ticks.
#[derive(Debug, Default)]
pub struct PlaybackController;

impl PlaybackController {
    /// Creates a controller.
    pub const fn new() -> Self {
        Self
    }

    /// Handles one tick.
    ///
    /// Applies `press` if there is one, then advances the tempo counter if a
    /// note or a gap is running.
    pub fn on_tick(
        &mut self,
        state: &mut PlaybackState,
        press: Option<Button>,
        scores: &ScoreBook,
        config: &SequencerConfig,
    ) -> Option<ControlEvent> {
        let event = press.map(|button| self.apply(state, button, scores, config));

        if state.is_progressing() {
            state.tempo_counter = state.tempo_counter.saturating_add(1);
        }

        event
    }

    /// Applies a single press without advancing the tempo counter.
    pub fn apply(
        &mut self,
        state: &mut PlaybackState,
        button: Button,
        scores: &ScoreBook,
        config: &SequencerConfig,
    ) -> ControlEvent {
        match button {
            Button::StartPause => {
                state.sound_on = !state.sound_on;
                ControlEvent::PlaybackToggled {
                    sound_on: state.sound_on,
                }
            }
            Button::Reset => self.reset_or_switch(state, scores, config),
            Button::SpeedUp => {
                state.tempo_scale = state
                    .tempo_scale
                    .decrease(config.speed_up_step, config.min_scale);
                debug!("tempo scale {}", state.tempo_scale.tenths());
                ControlEvent::TempoChanged(state.tempo_scale)
            }
            Button::SpeedDown => {
                state.tempo_scale = state
                    .tempo_scale
                    .increase(config.slow_down_step, config.max_scale);
                debug!("tempo scale {}", state.tempo_scale.tenths());
                ControlEvent::TempoChanged(state.tempo_scale)
            }
        }
    }

    /// Full reset while a note or gap is running; song switch when stopped
    /// exactly on a note boundary.
    fn reset_or_switch(
        &mut self,
        state: &mut PlaybackState,
        scores: &ScoreBook,
        config: &SequencerConfig,
    ) -> ControlEvent {
        if state.is_progressing() {
            state.reset(scores, config);
            debug!("playback reset");
            return ControlEvent::Reset;
        }

        if state.tempo_counter != 0 {
            return ControlEvent::Ignored;
        }

        let song = state.active_song.other();
        let score = scores.score(song);
        state.active_song = song;

        // Indices carry over; restart the new song if they fall outside it.
        if state.note_index >= score.len() {
            state.note_index = 0;
            state.duration_index = 0;
        }
        state.half_period = score.half_period(state.note_index);
        debug!("switched to song {} at note {}", song, state.note_index);
        ControlEvent::SongSwitched(song)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Score;
    use crate::state::PlaybackMode;
    use crate::types::Note;

    const A: [Note; 3] = [Note::new(100, 5), Note::new(110, 5), Note::new(120, 5)];
    const B: [Note; 2] = [Note::new(200, 5), Note::new(210, 5)];

    fn setup() -> (ScoreBook, SequencerConfig, PlaybackState) {
        let book = ScoreBook::new(Score::new(&A), Score::new(&B));
        let config = SequencerConfig::default();
        let state = PlaybackState::new(&book, &config);
        (book, config, state)
    }

    #[test]
    fn start_pause_flips_sound_only() {
        let (book, config, mut state) = setup();
        let mut ctl = PlaybackController::new();
        state.pause_on = true;
        state.tempo_counter = 3;

        let event = ctl.apply(&mut state, Button::StartPause, &book, &config);
        assert_eq!(event, ControlEvent::PlaybackToggled { sound_on: true });
        assert!(state.pause_on());
        assert_eq!(state.tempo_counter(), 3);

        ctl.apply(&mut state, Button::StartPause, &book, &config);
        assert!(!state.sound_on());
    }

    #[test]
    fn reset_while_playing_restores_startup_state() {
        let (book, config, mut state) = setup();
        let mut ctl = PlaybackController::new();
        state.active_song = Song::B;
        state.sound_on = true;
        state.note_index = 1;
        state.duration_index = 1;
        state.tempo_counter = 7;
        state.tempo_scale = TempoScale::from_tenths(33);
        state.half_period = 210;

        assert_eq!(ctl.apply(&mut state, Button::Reset, &book, &config), ControlEvent::Reset);
        assert_eq!(state, PlaybackState::new(&book, &config));
        assert_eq!(state.mode(), PlaybackMode::Stopped);
    }

    #[test]
    fn reset_while_stopped_on_boundary_switches_song_keeping_index() {
        let (book, config, mut state) = setup();
        let mut ctl = PlaybackController::new();
        state.note_index = 1;
        state.duration_index = 1;

        let event = ctl.apply(&mut state, Button::Reset, &book, &config);
        assert_eq!(event, ControlEvent::SongSwitched(Song::B));
        assert_eq!(state.note_index(), 1);
        assert_eq!(state.half_period(), 210);

        ctl.apply(&mut state, Button::Reset, &book, &config);
        assert_eq!(state.active_song(), Song::A);
        assert_eq!(state.half_period(), 110);
    }

    #[test]
    fn switch_to_shorter_song_restarts_out_of_range_index() {
        let (book, config, mut state) = setup();
        let mut ctl = PlaybackController::new();
        state.note_index = 2;
        state.duration_index = 2;

        ctl.apply(&mut state, Button::Reset, &book, &config);
        assert_eq!(state.active_song(), Song::B);
        assert_eq!(state.note_index(), 0);
        assert_eq!(state.duration_index(), 0);
        assert_eq!(state.half_period(), 200);
    }

    #[test]
    fn reset_while_stopped_mid_note_is_ignored() {
        let (book, config, mut state) = setup();
        let mut ctl = PlaybackController::new();
        state.tempo_counter = 4;

        assert_eq!(ctl.apply(&mut state, Button::Reset, &book, &config), ControlEvent::Ignored);
        assert_eq!(state.active_song(), Song::A);
    }

    #[test]
    fn tick_counts_only_while_progressing() {
        let (book, config, mut state) = setup();
        let mut ctl = PlaybackController::new();

        ctl.on_tick(&mut state, None, &book, &config);
        assert_eq!(state.tempo_counter(), 0);

        state.pause_on = true;
        ctl.on_tick(&mut state, None, &book, &config);
        assert_eq!(state.tempo_counter(), 1);
    }

    #[test]
    fn speed_buttons_clamp_scale() {
        let (book, config, mut state) = setup();
        let mut ctl = PlaybackController::new();

        for _ in 0..30 {
            ctl.apply(&mut state, Button::SpeedUp, &book, &config);
        }
        assert_eq!(state.tempo_scale(), TempoScale::MIN);

        for _ in 0..30 {
            ctl.apply(&mut state, Button::SpeedDown, &book, &config);
        }
        assert_eq!(state.tempo_scale(), TempoScale::MAX);
    }
}
