//! Process-wide sequencer instance for interrupt handlers.
//!
//! Both interrupt handlers need the same [`ToneSequencer`]. Declare one
//! [`SharedSequencer`] as a `static`, call [`SharedSequencer::init`] once from
//! `main` after the hardware is set up, and call the `on_*` methods from the
//! handlers. Every access runs inside a critical section, so the two
//! handlers never see each other's partial updates.
//!
//! ```ignore
//! static SEQUENCER: SharedSequencer<BoardTone, BoardLeds> = SharedSequencer::new();
//!
//! #[interrupt]
//! fn TIM2() {
//!     let _ = SEQUENCER.on_timer_compare();
//! }
//! ```

use core::cell::RefCell;
use critical_section::Mutex;

use crate::button::ButtonLevels;
use crate::controller::ControlEvent;
use crate::sequencer::{Indicators, ToneSequencer};
use crate::tone::{ToneEvent, ToneOutput};

/// Shared sequencer errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SharedError {
    /// An event arrived before [`SharedSequencer::init`].
    NotInitialized,

    /// [`SharedSequencer::init`] was called a second time.
    AlreadyInitialized,
}

impl core::fmt::Display for SharedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SharedError::NotInitialized => write!(f, "sequencer not initialized"),
            SharedError::AlreadyInitialized => write!(f, "sequencer already initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SharedError {}

/// A [`ToneSequencer`] behind a critical-section mutex.
pub struct SharedSequencer<T: ToneOutput, I: Indicators> {
    inner: Mutex<RefCell<Option<ToneSequencer<T, I>>>>,
}

impl<T: ToneOutput, I: Indicators> SharedSequencer<T, I> {
    /// Creates an empty slot, usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Installs the sequencer. Call once, before enabling the interrupts.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - a sequencer is already installed; `sequencer` is dropped
    pub fn init(&self, sequencer: ToneSequencer<T, I>) -> Result<(), SharedError> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            if slot.is_some() {
                return Err(SharedError::AlreadyInitialized);
            }
            *slot = Some(sequencer);
            info!("sequencer initialized");
            Ok(())
        })
    }

    /// Whether [`SharedSequencer::init`] has run.
    pub fn is_initialized(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Runs `f` on the sequencer inside a critical section.
    ///
    /// # Errors
    /// * `NotInitialized` - no sequencer installed yet
    pub fn with<R>(&self, f: impl FnOnce(&mut ToneSequencer<T, I>) -> R) -> Result<R, SharedError> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            slot.as_mut().map(f).ok_or(SharedError::NotInitialized)
        })
    }

    /// Timer compare entry point.
    pub fn on_timer_compare(&self) -> Result<ToneEvent, SharedError> {
        self.with(|seq| seq.on_timer_compare())
    }

    /// Tick entry point.
    pub fn on_tick(&self, levels: ButtonLevels) -> Result<Option<ControlEvent>, SharedError> {
        self.with(|seq| seq.on_tick(levels))
    }
}

impl<T: ToneOutput, I: Indicators> Default for SharedSequencer<T, I> {
    fn default() -> Self {
        Self::new()
    }
}
