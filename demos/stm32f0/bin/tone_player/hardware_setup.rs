use cortex_m::peripheral::{scb::SystemHandler, SYST};
use rtt_target::rprintln;
use stm32f0xx_hal::{
    gpio::{gpioa, gpiob, Alternate, Floating, Input, Output, PullUp, PushPull, AF2},
    pac,
    prelude::*,
};

use stm32f0_demos::status_leds::StatusLeds;
use stm32f0_demos::timer_tone::TimerTone;

/// Tick period in milliseconds for button sampling and note timing
pub const TICK_MS: u32 = 8;

/// Timer clock the built-in pitch table expects
const TONE_TIMER_HZ: u32 = tone_sequencer::TIMER_HZ;

/// Status LEDs: completion on PA5 (onboard), playback on PA6, song B on PA7
pub type Leds = StatusLeds<
    gpioa::PA5<Output<PushPull>>,
    gpioa::PA6<Output<PushPull>>,
    gpioa::PA7<Output<PushPull>>,
>;

/// The four control buttons on PB4..PB7, pulled up, active low
pub struct Buttons {
    pub start_pause: gpiob::PB4<Input<PullUp>>,
    pub reset: gpiob::PB5<Input<PullUp>>,
    pub speed_up: gpiob::PB6<Input<PullUp>>,
    pub speed_down: gpiob::PB7<Input<PullUp>>,
}

/// Container for all initialized hardware peripherals
pub struct HardwareContext {
    pub tone: TimerTone,
    pub leds: Leds,
    pub buttons: Buttons,
    /// Keeps PA0 in its TIM2_CH1 alternate function
    pub tone_pin: gpioa::PA0<Alternate<AF2>>,
}

/// Initialize all hardware peripherals
///
/// - System clock configuration
/// - SysTick tick every `TICK_MS`
/// - TIM2 at 1 MHz driving the tone pin (PA0)
/// - Status LEDs and button inputs
/// - Interrupt priorities: TIM2 above SysTick
pub fn init_hardware() -> HardwareContext {
    let mut dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    let mut rcc = dp.RCC.configure().sysclk(8.mhz()).freeze(&mut dp.FLASH);
    let sysclk = rcc.clocks.sysclk().0;
    rprintln!("System clock configured: {} Hz", sysclk);

    configure_systick(sysclk, &mut cp.SYST);

    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpiob = dp.GPIOB.split(&mut rcc);

    let (tone_pin, completion, playback, song) = cortex_m::interrupt::free(|cs| {
        (
            gpioa.pa0.into_alternate_af2(cs),
            gpioa.pa5.into_push_pull_output(cs),
            gpioa.pa6.into_push_pull_output(cs),
            gpioa.pa7.into_push_pull_output(cs),
        )
    });

    let buttons = setup_buttons(gpiob.pb4, gpiob.pb5, gpiob.pb6, gpiob.pb7);
    let tone = setup_tone_timer(dp.TIM2, sysclk);

    // Lower number is higher priority. A compare match pending alongside a
    // tick is served first.
    unsafe {
        cp.NVIC.set_priority(pac::Interrupt::TIM2, 0x00);
        cp.SCB.set_priority(SystemHandler::SysTick, 0x40);
    }

    HardwareContext {
        tone,
        leds: StatusLeds::new(completion, playback, song),
        buttons,
        tone_pin,
    }
}

/// Configure SysTick for the periodic button/tempo tick
fn configure_systick(sysclk: u32, syst: &mut SYST) {
    syst.set_clock_source(cortex_m::peripheral::syst::SystClkSource::Core);
    syst.set_reload(sysclk / 1_000 * TICK_MS - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    rprintln!("SysTick configured for {}ms ticks", TICK_MS);
}

/// Configure button inputs with pull-ups
fn setup_buttons(
    pb4: gpiob::PB4<Input<Floating>>,
    pb5: gpiob::PB5<Input<Floating>>,
    pb6: gpiob::PB6<Input<Floating>>,
    pb7: gpiob::PB7<Input<Floating>>,
) -> Buttons {
    let buttons = cortex_m::interrupt::free(|cs| Buttons {
        start_pause: pb4.into_pull_up_input(cs),
        reset: pb5.into_pull_up_input(cs),
        speed_up: pb6.into_pull_up_input(cs),
        speed_down: pb7.into_pull_up_input(cs),
    });

    rprintln!("Buttons configured on PB4..PB7");
    buttons
}

/// Enable TIM2 and prescale it to the tone timer clock
fn setup_tone_timer(tim2: pac::TIM2, sysclk: u32) -> TimerTone {
    // SAFETY: single-threaded init, RCC is otherwise owned by the HAL.
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

    let prescaler = sysclk / TONE_TIMER_HZ - 1;
    tim2.psc.write(|w| w.psc().bits(prescaler as u16));
    // Output compare toggle/force modes are set per note by the sequencer.
    tim2.egr.write(|w| w.ug().set_bit());

    rprintln!("TIM2 tone timer at {} Hz on PA0", TONE_TIMER_HZ);
    TimerTone::new(tim2)
}
