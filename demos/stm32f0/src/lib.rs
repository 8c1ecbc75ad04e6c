#![no_std]

pub mod timer_tone;
pub mod status_leds;
