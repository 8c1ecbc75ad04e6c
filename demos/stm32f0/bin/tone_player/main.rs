#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m_rt::entry;
use critical_section::Mutex;
use embedded_hal::digital::v2::InputPin;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f0xx_hal::pac::{self, interrupt};

use stm32f0_demos::timer_tone::TimerTone;
use tone_sequencer::{ButtonLevels, ScoreBook, SharedSequencer, ToneSequencer};

mod hardware_setup;

use hardware_setup::{Buttons, Leds};

/// The sequencer shared by both interrupt handlers
static SEQUENCER: SharedSequencer<TimerTone, Leds> = SharedSequencer::new();

/// Button pins, read only from SysTick
static BUTTONS: Mutex<RefCell<Option<Buttons>>> = Mutex::new(RefCell::new(None));

/// Tone timer wrap - reprogram the next half-period and advance the score
#[interrupt]
fn TIM2() {
    clear_tim2_flag();
    let _ = SEQUENCER.on_timer_compare();
}

/// Periodic tick - sample buttons, apply one press, count note length
#[cortex_m_rt::exception]
fn SysTick() {
    let levels = critical_section::with(|cs| {
        BUTTONS.borrow_ref(cs).as_ref().map(|b| {
            ButtonLevels::from_pins(
                b.start_pause.is_high().unwrap_or(true),
                b.reset.is_high().unwrap_or(true),
                b.speed_up.is_high().unwrap_or(true),
                b.speed_down.is_high().unwrap_or(true),
            )
        })
    });

    if let Some(levels) = levels {
        let _ = SEQUENCER.on_tick(levels);
    }
}

fn clear_tim2_flag() {
    // SAFETY: only the UIF bit is written, from the TIM2 handler.
    let tim2 = unsafe { &*pac::TIM2::ptr() };
    tim2.sr.modify(|_, w| w.uif().clear_bit());
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Tone Sequencer ===");

    let hw = hardware_setup::init_hardware();
    let _tone_pin = hw.tone_pin;
    rprintln!("Hardware initialized successfully");

    let sequencer = ToneSequencer::new(hw.tone, hw.leds, ScoreBook::builtin());
    if let Err(e) = SEQUENCER.init(sequencer) {
        rprintln!("Sequencer init failed: {}", e);
    }
    critical_section::with(|cs| BUTTONS.borrow_ref_mut(cs).replace(hw.buttons));

    // SAFETY: both handlers only touch state installed above.
    unsafe { cortex_m::peripheral::NVIC::unmask(pac::Interrupt::TIM2) };

    rprintln!("=== System Ready ===");
    rprintln!("  PB4: start/pause");
    rprintln!("  PB5: reset (stopped on a note boundary: switch song)");
    rprintln!("  PB6: faster");
    rprintln!("  PB7: slower");

    loop {
        cortex_m::asm::wfi();
    }
}
