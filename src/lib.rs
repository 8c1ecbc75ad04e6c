#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Score`** / **`ScoreBook`**: Read-only `(half-period, duration)` note tables for song A and song B
//! - **`ToneGenerator`**: Timer compare handler that reschedules edges, advances notes and inserts gaps
//! - **`ButtonDebouncer`**: Tick handler front end that turns pin levels into one prioritized press
//! - **`PlaybackController`**: Applies Start/Pause, Reset, SpeedUp and SpeedDown to the shared state
//! - **`ToneSequencer`**: Owns the state and hardware and exposes one entry point per interrupt
//! - **`ToneOutput`** / **`Indicators`**: Traits to implement for your timer channel and status LEDs
//! - **`EventQueue`**: Fixed-priority queue for running both handlers from a single consumer
//! - **`SharedSequencer`**: `static`-friendly, critical-section guarded sequencer slot
//!
//! Pitch is set by the half-period, the number of timer ticks between output
//! toggles. Note length is counted in ticks of the periodic button-sampling
//! interrupt and stretched by the tempo scale.

#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod controller;
pub mod event;
pub mod score;
pub mod sequencer;
pub mod shared;
pub mod songs;
pub mod state;
pub mod tone;
pub mod types;

pub use button::{ButtonDebouncer, ButtonLevels, ButtonState};
pub use config::SequencerConfig;
pub use controller::{ControlEvent, PlaybackController};
pub use event::{Event, EventError, EventQueue};
pub use score::{Score, ScoreBook};
pub use sequencer::{Handled, Indicators, ToneSequencer};
pub use shared::{SharedError, SharedSequencer};
pub use state::{PlaybackMode, PlaybackState};
pub use tone::{ToneEvent, ToneGenerator, ToneOutput, frequency_hz};
pub use types::{Button, ConfigError, Note, ScoreError, Song, TempoScale};

/// Timer clock the built-in pitch table is computed for.
pub const TIMER_HZ: u32 = 1_000_000;
