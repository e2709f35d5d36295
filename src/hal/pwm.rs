//! PWM (Pulse Width Modulation) HAL implementation
//!
//! Hardware PWM on Timer1 (OC1A/B/C) and Timer3 (OC3A/B/C), fast PWM
//! with ICR as top. Duty is expressed as an 8-bit level since every
//! consumer in this firmware is an LED.

use avr_device::atmega128a::{TC1, TC3};
use core::marker::PhantomData;

/// PWM frequency presets
#[derive(Clone, Copy)]
pub enum PwmFreq {
    Hz250 = 250,
    Hz1000 = 1000, // comfortably above anything an eye can see
}

/// PWM output channel
#[derive(Clone, Copy)]
pub enum PwmChannel {
    Timer1A,
    Timer1B,
    Timer1C,
    Timer3A,
    Timer3B,
    Timer3C,
}

/// PWM mode configuration
#[derive(Clone, Copy)]
pub enum PwmMode {
    Fast,
    PhaseCorrect,
}

pub struct Pwm<T> {
    _timer: PhantomData<T>,

    // Cached so level-to-counts scaling doesn't re-read registers
    period: u16,
}

// Timer parameters for a 16 MHz clock, clk/8 prescaler (CS = 2)
fn timer_params(freq: PwmFreq) -> (u16, u8) {
    match freq {
        PwmFreq::Hz250 => (8000, 2),  // 16MHz / (250Hz * 8)
        PwmFreq::Hz1000 => (2000, 2), // 16MHz / (1000Hz * 8)
    }
}

fn level_to_counts(level: u8, period: u16) -> u16 {
    ((period as u32 * level as u32) / 255) as u16
}

// Timer1 implementation
impl Pwm<TC1> {
    pub fn new() -> Self {
        Self {
            _timer: PhantomData,
            period: 0,
        }
    }

    /// Configure PWM frequency and mode. Compare outputs stay
    /// disconnected until the first `set_level` on a channel.
    pub fn configure(&mut self, freq: PwmFreq, mode: PwmMode) {
        let (period, cs) = timer_params(freq);
        self.period = period;

        unsafe {
            let p = TC1::ptr();
            match mode {
                PwmMode::Fast => {
                    // WGM13:0 = 14, fast PWM with ICR1 top
                    (*p).tccr1a.write(|w| w.bits(0x02));
                    (*p).tccr1b.write(|w| w.bits(0x18 | cs));
                }
                PwmMode::PhaseCorrect => {
                    // WGM13:0 = 10, phase correct with ICR1 top
                    (*p).tccr1a.write(|w| w.bits(0x02));
                    (*p).tccr1b.write(|w| w.bits(0x10 | cs));
                }
            }
            (*p).icr1.write(|w| w.bits(period));
        }
    }

    /// Set a channel's duty as a 0..=255 level. Connects the compare
    /// output (non-inverting) on first use.
    pub fn set_level(&mut self, channel: PwmChannel, level: u8) {
        let counts = level_to_counts(level, self.period);

        unsafe {
            let p = TC1::ptr();
            match channel {
                PwmChannel::Timer1A => {
                    (*p).tccr1a.modify(|r, w| w.bits(r.bits() | 0x80));
                    (*p).ocr1a.write(|w| w.bits(counts));
                }
                PwmChannel::Timer1B => {
                    (*p).tccr1a.modify(|r, w| w.bits(r.bits() | 0x20));
                    (*p).ocr1b.write(|w| w.bits(counts));
                }
                PwmChannel::Timer1C => {
                    (*p).tccr1a.modify(|r, w| w.bits(r.bits() | 0x08));
                    (*p).ocr1c.write(|w| w.bits(counts));
                }
                _ => {} // not a Timer1 channel
            }
        }
    }
}

// Timer3 implementation, register-for-register the same layout
// TODO: fold the Timer1/Timer3 twins into a macro like the gpio ports
impl Pwm<TC3> {
    pub fn new() -> Self {
        Self {
            _timer: PhantomData,
            period: 0,
        }
    }

    pub fn configure(&mut self, freq: PwmFreq, mode: PwmMode) {
        let (period, cs) = timer_params(freq);
        self.period = period;

        unsafe {
            let p = TC3::ptr();
            match mode {
                PwmMode::Fast => {
                    (*p).tccr3a.write(|w| w.bits(0x02));
                    (*p).tccr3b.write(|w| w.bits(0x18 | cs));
                }
                PwmMode::PhaseCorrect => {
                    (*p).tccr3a.write(|w| w.bits(0x02));
                    (*p).tccr3b.write(|w| w.bits(0x10 | cs));
                }
            }
            (*p).icr3.write(|w| w.bits(period));
        }
    }

    pub fn set_level(&mut self, channel: PwmChannel, level: u8) {
        let counts = level_to_counts(level, self.period);

        unsafe {
            let p = TC3::ptr();
            match channel {
                PwmChannel::Timer3A => {
                    (*p).tccr3a.modify(|r, w| w.bits(r.bits() | 0x80));
                    (*p).ocr3a.write(|w| w.bits(counts));
                }
                PwmChannel::Timer3B => {
                    (*p).tccr3a.modify(|r, w| w.bits(r.bits() | 0x20));
                    (*p).ocr3b.write(|w| w.bits(counts));
                }
                PwmChannel::Timer3C => {
                    (*p).tccr3a.modify(|r, w| w.bits(r.bits() | 0x08));
                    (*p).ocr3c.write(|w| w.bits(counts));
                }
                _ => {} // not a Timer3 channel
            }
        }
    }
}

impl Default for Pwm<TC1> {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Pwm<TC3> {
    fn default() -> Self {
        Self::new()
    }
}
