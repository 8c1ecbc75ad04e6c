use stm32f0xx_hal::pac::TIM2;
use tone_sequencer::ToneOutput;

/// OC1M value: toggle CH1 on every match.
const OC_MODE_TOGGLE: u32 = 0b011;
/// OC1M value: hold CH1 low.
const OC_MODE_FORCE_LOW: u32 = 0b100;
const OC1M_SHIFT: u32 = 4;
const OC1M_MASK: u32 = 0b111 << OC1M_SHIFT;

/// Tone output on TIM2 channel 1
///
/// TIM2 counts at 1 MHz and wraps every `half_period` ticks. CH1 compares
/// at zero, so in toggle mode the pin flips once per wrap and the output is a
/// 50% square wave at `1 MHz / (2 * half_period)`. The update interrupt stays
/// enabled in both modes so note timing keeps running through silence.
pub struct TimerTone {
    tim: TIM2,
}

impl TimerTone {
    /// Takes a TIM2 that is already clocked, prescaled to 1 MHz and routed
    /// to the tone pin.
    pub fn new(tim: TIM2) -> Self {
        // Buffer ARR so a new half-period starts on the next wrap.
        tim.cr1.modify(|_, w| w.arpe().set_bit());
        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccer.modify(|_, w| w.cc1e().set_bit());
        tim.dier.modify(|_, w| w.uie().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    fn set_output_mode(&mut self, mode: u32) {
        self.tim
            .ccmr1_output()
            .modify(|r, w| unsafe { w.bits((r.bits() & !OC1M_MASK) | (mode << OC1M_SHIFT)) });
    }
}

impl ToneOutput for TimerTone {
    fn set_compare_interval(&mut self, ticks: u16) {
        let reload = u32::from(ticks.max(1)) - 1;
        self.tim.arr.write(|w| unsafe { w.bits(reload) });
    }

    fn set_toggle(&mut self, toggle: bool) {
        if toggle {
            self.set_output_mode(OC_MODE_TOGGLE);
        } else {
            self.set_output_mode(OC_MODE_FORCE_LOW);
        }
    }
}
