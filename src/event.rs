//! The two event sources and the fixed order they are consumed in.
//!
//! Interrupt handlers post events here and return. A single consumer pops
//! them one at a time and feeds each to the sequencer, so state updates never
//! interleave. When both kinds are pending, timer compare events go first:
//! they gate the next waveform edge, while a tick can wait a few microseconds.

use crate::button::ButtonLevels;
use heapless::Deque;

/// An event from one of the two interrupt sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The tone timer reached its compare value.
    TimerCompare,
    /// The periodic tick fired with these button levels.
    Tick(ButtonLevels),
}

/// Event queue errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// No room for another tick sample. The sample was dropped.
    QueueFull,
}

impl core::fmt::Display for EventError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EventError::QueueFull => write!(f, "event queue is full, tick dropped"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EventError {}

/// Pending events, popped in priority order.
///
/// Compare events carry no data and are only counted. Tick samples are kept
/// in arrival order, up to `N` of them.
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    compares: u16,
    ticks: Deque<ButtonLevels, N>,
    dropped_ticks: u32,
}

impl<const N: usize> EventQueue<N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            compares: 0,
            ticks: Deque::new(),
            dropped_ticks: 0,
        }
    }

    /// Records a timer compare event.
    pub fn post_compare(&mut self) {
        self.compares = self.compares.saturating_add(1);
    }

    /// Records a tick with the button levels sampled on it.
    ///
    /// # Errors
    /// * `QueueFull` - `N` ticks are already waiting; this one is lost
    pub fn post_tick(&mut self, levels: ButtonLevels) -> Result<(), EventError> {
        self.ticks.push_back(levels).map_err(|_| {
            self.dropped_ticks = self.dropped_ticks.wrapping_add(1);
            warn!("tick dropped, {} total", self.dropped_ticks);
            EventError::QueueFull
        })
    }

    /// Posts any event.
    pub fn post(&mut self, event: Event) -> Result<(), EventError> {
        match event {
            Event::TimerCompare => {
                self.post_compare();
                Ok(())
            }
            Event::Tick(levels) => self.post_tick(levels),
        }
    }

    /// Removes the next event: compares before ticks, ticks oldest first.
    pub fn pop(&mut self) -> Option<Event> {
        if self.compares > 0 {
            self.compares -= 1;
            return Some(Event::TimerCompare);
        }
        self.ticks.pop_front().map(Event::Tick)
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.compares == 0 && self.ticks.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.compares as usize + self.ticks.len()
    }

    /// Tick samples lost to a full queue since startup. Wraps on overflow.
    pub fn dropped_ticks(&self) -> u32 {
        self.dropped_ticks
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
