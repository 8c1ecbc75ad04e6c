//! Shared test infrastructure for tone-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use tone_sequencer::{
    Button, ButtonLevels, Indicators, Note, Score, ScoreBook, Song, ToneEvent, ToneOutput,
    ToneSequencer,
};

// ============================================================================
// Mock Tone Output
// ============================================================================

/// Mock timer channel that records every compare interval and output mode
pub struct MockTone {
    intervals: heapless::Vec<u16, 64>,
    last_interval: Option<u16>,
    toggle: bool,
}

impl MockTone {
    pub fn new() -> Self {
        Self {
            intervals: heapless::Vec::new(),
            last_interval: None,
            toggle: false,
        }
    }

    pub fn last_interval(&self) -> Option<u16> {
        self.last_interval
    }

    /// First 64 programmed intervals
    pub fn intervals(&self) -> &[u16] {
        &self.intervals
    }

    pub fn is_toggling(&self) -> bool {
        self.toggle
    }
}

impl ToneOutput for MockTone {
    fn set_compare_interval(&mut self, ticks: u16) {
        self.last_interval = Some(ticks);
        let _ = self.intervals.push(ticks);
    }

    fn set_toggle(&mut self, toggle: bool) {
        self.toggle = toggle;
    }
}

// ============================================================================
// Mock Indicators
// ============================================================================

/// Mock status outputs: a completion LED that toggles, plus hook counters
pub struct MockIndicators {
    pub completion_led: bool,
    pub completions: u32,
    pub playback_toggles: u32,
    pub selected: heapless::Vec<Song, 16>,
}

impl MockIndicators {
    pub fn new() -> Self {
        Self {
            completion_led: false,
            completions: 0,
            playback_toggles: 0,
            selected: heapless::Vec::new(),
        }
    }
}

impl Indicators for MockIndicators {
    fn song_completed(&mut self) {
        self.completion_led = !self.completion_led;
        self.completions += 1;
    }

    fn playback_toggled(&mut self, _sound_on: bool) {
        self.playback_toggles += 1;
    }

    fn song_selected(&mut self, song: Song) {
        let _ = self.selected.push(song);
    }
}

// ============================================================================
// Test Scores
// ============================================================================

pub const TWO_NOTES: [Note; 2] = [Note::new(100, 5), Note::new(200, 5)];
pub const THREE_NOTES: [Note; 3] = [Note::new(300, 3), Note::new(400, 3), Note::new(500, 3)];

pub fn test_book() -> ScoreBook {
    ScoreBook::new(Score::new(&TWO_NOTES), Score::new(&THREE_NOTES))
}

pub type TestSequencer = ToneSequencer<MockTone, MockIndicators>;

pub fn test_sequencer() -> TestSequencer {
    ToneSequencer::new(MockTone::new(), MockIndicators::new(), test_book())
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// One tick with `button` held down
pub fn press(seq: &mut TestSequencer, button: Button) {
    seq.on_tick(ButtonLevels::pressed(&[button]));
}

/// One tick with every button released
pub fn release(seq: &mut TestSequencer) {
    seq.on_tick(ButtonLevels::RELEASED);
}

/// Alternates one released tick and one compare event until a note
/// transition happens or `max_ticks` runs out
pub fn run_to_transition(seq: &mut TestSequencer, max_ticks: u32) -> Option<ToneEvent> {
    for _ in 0..max_ticks {
        release(seq);
        match seq.on_timer_compare() {
            event @ (ToneEvent::NoteAdvanced { .. } | ToneEvent::SongCompleted) => {
                return Some(event);
            }
            ToneEvent::GapEnded | ToneEvent::Idle => {}
        }
    }
    None
}
