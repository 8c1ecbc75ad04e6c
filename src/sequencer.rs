//! Tone sequencer tying the two event handlers to their hardware.
//!
//! Provides [`ToneSequencer`], which owns the playback state, the tone
//! output and the indicator outputs, and exposes one entry point per
//! interrupt source. Also defines the [`Indicators`] trait for the status
//! outputs.

use crate::button::{ButtonDebouncer, ButtonLevels};
use crate::config::SequencerConfig;
use crate::controller::{ControlEvent, PlaybackController};
use crate::event::{Event, EventQueue};
use crate::score::ScoreBook;
use crate::state::PlaybackState;
use crate::tone::{ToneEvent, ToneGenerator, ToneOutput};
use crate::types::{ConfigError, Song};

/// Trait for abstracting the status outputs.
///
/// Only [`Indicators::song_completed`] is required. The other hooks mirror
/// playback changes onto spare LEDs and default to doing nothing.
pub trait Indicators {
    /// Called once each time the active song plays through its last note.
    ///
    /// Typically toggles an LED, so the level flips once per completed song.
    fn song_completed(&mut self);

    /// Called when Start/Pause switches the output on or off.
    fn playback_toggled(&mut self, _sound_on: bool) {}

    /// Called when a reset or song switch selects `song`.
    fn song_selected(&mut self, _song: Song) {}
}

/// What handling one event produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handled {
    /// Result of a timer compare event.
    Tone(ToneEvent),
    /// Result of a tick. `None` when no button was pressed.
    Control(Option<ControlEvent>),
}

/// Drives a tone output from a pair of scores under button control.
///
/// Call [`ToneSequencer::on_timer_compare`] from the timer compare interrupt
/// and [`ToneSequencer::on_tick`] from the periodic tick, or post both into
/// an [`EventQueue`] and drain it with [`ToneSequencer::service`].
///
/// # Type Parameters
/// * `T` - Tone timer channel
/// * `I` - Status outputs
pub struct ToneSequencer<T: ToneOutput, I: Indicators> {
    output: T,
    indicators: I,
    scores: ScoreBook,
    config: SequencerConfig,
    state: PlaybackState,
    tone: ToneGenerator,
    buttons: ButtonDebouncer,
    controller: PlaybackController,
    completed_cycles: u32,
}

impl<T: ToneOutput, I: Indicators> ToneSequencer<T, I> {
    /// Creates a stopped sequencer with the default constants.
    ///
    /// Programs the first compare interval with the output held.
    pub fn new(output: T, indicators: I, scores: ScoreBook) -> Self {
        Self::build(output, indicators, scores, SequencerConfig::default())
    }

    /// Creates a stopped sequencer with custom constants.
    ///
    /// # Errors
    /// Returns the first problem [`SequencerConfig::validate`] finds.
    pub fn with_config(
        output: T,
        indicators: I,
        scores: ScoreBook,
        config: SequencerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(output, indicators, scores, config))
    }

    fn build(mut output: T, indicators: I, scores: ScoreBook, config: SequencerConfig) -> Self {
        let state = PlaybackState::new(&scores, &config);
        output.set_compare_interval(state.half_period());
        output.set_toggle(false);

        Self {
            output,
            indicators,
            scores,
            config,
            state,
            tone: ToneGenerator::new(),
            buttons: ButtonDebouncer::new(),
            controller: PlaybackController::new(),
            completed_cycles: 0,
        }
    }

    /// Handles a timer compare match.
    pub fn on_timer_compare(&mut self) -> ToneEvent {
        let event = self
            .tone
            .on_compare(&mut self.state, &self.scores, &self.config, &mut self.output);

        if event == ToneEvent::SongCompleted {
            self.completed_cycles = self.completed_cycles.wrapping_add(1);
            self.indicators.song_completed();
        }

        event
    }

    /// Handles a periodic tick with freshly sampled button levels.
    pub fn on_tick(&mut self, levels: ButtonLevels) -> Option<ControlEvent> {
        let press = self.buttons.sample(levels);
        let event = self
            .controller
            .on_tick(&mut self.state, press, &self.scores, &self.config);

        match event {
            Some(ControlEvent::PlaybackToggled { sound_on }) => {
                self.indicators.playback_toggled(sound_on);
            }
            Some(ControlEvent::Reset) => {
                self.indicators.song_selected(self.state.active_song());
            }
            Some(ControlEvent::SongSwitched(song)) => {
                self.indicators.song_selected(song);
            }
            Some(ControlEvent::TempoChanged(_)) | Some(ControlEvent::Ignored) | None => {}
        }

        event
    }

    /// Dispatches a single event to its handler.
    pub fn handle_event(&mut self, event: Event) -> Handled {
        match event {
            Event::TimerCompare => Handled::Tone(self.on_timer_compare()),
            Event::Tick(levels) => Handled::Control(self.on_tick(levels)),
        }
    }

    /// Drains `queue` in priority order. Returns how many events ran.
    pub fn service<const N: usize>(&mut self, queue: &mut EventQueue<N>) -> usize {
        let mut handled = 0;
        while let Some(event) = queue.pop() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Current playback state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Constants in effect.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// The two scores.
    pub fn scores(&self) -> &ScoreBook {
        &self.scores
    }

    /// Timer compare events handled since startup. Wraps on overflow.
    pub fn compare_events(&self) -> u32 {
        self.tone.compare_events()
    }

    /// Songs played through to the end since startup. Wraps on overflow.
    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// The tone output.
    pub fn output(&self) -> &T {
        &self.output
    }

    /// The status outputs.
    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Consumes the sequencer and hands back its hardware.
    pub fn release(self) -> (T, I) {
        (self.output, self.indicators)
    }
}
