//! RC receiver input: three PWM channels captured by edge interrupts.
//!
//! The ISRs below are the only writers of the shared channel bank; the
//! main loop reads it exclusively through [`RcReceiver::snapshot`],
//! which is the single capture-side critical section in the system.

use avr_device::atmega128a::PORTE;
use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;

use crate::capture::{ChannelBank, ChannelId, Snapshot};
use crate::hal::extint::{ExtInt, ExtIntLine};
use crate::hal::gpio::board::{Ch2, Ch3, Ch7};
use crate::hal::timer;

static CHANNELS: Mutex<RefCell<ChannelBank>> = Mutex::new(RefCell::new(ChannelBank::new()));

pub struct RcReceiver {
    _private: (),
}

impl RcReceiver {
    /// Claim the input pins (pulled up, the receiver line floats between
    /// frames), switch INT4..INT6 to any-edge sense and unmask them.
    pub fn new() -> Self {
        let _ = Ch7::default().into_pull_up_input();
        let _ = Ch3::default().into_pull_up_input();
        let _ = Ch2::default().into_pull_up_input();

        let mut exti = ExtInt::new();
        exti.enable_any_change(ExtIntLine::Int4);
        exti.enable_any_change(ExtIntLine::Int5);
        exti.enable_any_change(ExtIntLine::Int6);

        Self { _private: () }
    }

    /// Take the per-tick snapshot: all three widths and freshness flags
    /// copied as one consistent group, freshness cleared. Capture
    /// interrupts are held off only for the copy itself.
    pub fn snapshot(&mut self) -> Snapshot {
        let now = timer::now_us();
        interrupt::free(|cs| CHANNELS.borrow(cs).borrow_mut().snapshot(now))
    }
}

/// Shared edge path for the three capture interrupts. AVR clears the I
/// flag on ISR entry, so the handlers cannot preempt each other; the
/// inner critical section is for the shared-bank borrow.
fn capture_edge(id: ChannelId, pin_bit: u8) {
    let now = timer::now_us();
    let level_high = unsafe { (*PORTE::ptr()).pine.read().bits() & (1 << pin_bit) != 0 };
    interrupt::free(|cs| {
        CHANNELS
            .borrow(cs)
            .borrow_mut()
            .channel_mut(id)
            .record_edge(level_high, now);
    });
}

#[avr_device::interrupt(atmega128a)]
fn INT4() {
    capture_edge(ChannelId::OnOff, 4);
}

#[avr_device::interrupt(atmega128a)]
fn INT5() {
    capture_edge(ChannelId::Brightness, 5);
}

#[avr_device::interrupt(atmega128a)]
fn INT6() {
    capture_edge(ChannelId::Hue, 6);
}
