use embedded_hal::digital::v2::{OutputPin, ToggleableOutputPin};
use tone_sequencer::{Indicators, Song};

/// Status LEDs driven by the sequencer
///
/// - `completion` toggles each time a song plays through
/// - `playback` is lit while the tone output is on
/// - `song` is lit while song B is selected
pub struct StatusLeds<C, P, S>
where
    C: ToggleableOutputPin,
    P: OutputPin,
    S: OutputPin,
{
    completion: C,
    playback: P,
    song: S,
}

impl<C, P, S> StatusLeds<C, P, S>
where
    C: ToggleableOutputPin,
    P: OutputPin,
    S: OutputPin,
{
    pub fn new(completion: C, mut playback: P, mut song: S) -> Self {
        let _ = playback.set_low();
        let _ = song.set_low();

        Self {
            completion,
            playback,
            song,
        }
    }
}

impl<C, P, S> Indicators for StatusLeds<C, P, S>
where
    C: ToggleableOutputPin,
    P: OutputPin,
    S: OutputPin,
{
    fn song_completed(&mut self) {
        let _ = self.completion.toggle();
    }

    fn playback_toggled(&mut self, sound_on: bool) {
        let _ = if sound_on {
            self.playback.set_high()
        } else {
            self.playback.set_low()
        };
    }

    fn song_selected(&mut self, song: Song) {
        let _ = self.playback.set_low();
        let _ = match song {
            Song::A => self.song.set_low(),
            Song::B => self.song.set_high(),
        };
    }
}
