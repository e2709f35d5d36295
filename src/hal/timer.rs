//! System timebase: Timer0 as a free-running microsecond clock.
//!
//! Timer0 counts at clk/8 (2 MHz, half a microsecond per count) and
//! overflows every 128 us; the overflow interrupt extends the 8-bit
//! counter to 32 bits. `now_us` wraps after about 71 minutes, so
//! consumers compare times with wrapping arithmetic only.

use avr_device::atmega128a::TC0;
use avr_device::interrupt::{self, Mutex};
use core::cell::Cell;

const US_PER_OVERFLOW: u32 = 128;

static OVERFLOWS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

pub struct Clock {
    _private: (),
}

impl Clock {
    /// Start Timer0 free-running at clk/8 with the overflow interrupt on.
    pub fn new() -> Self {
        unsafe {
            let p = TC0::ptr();
            (*p).tcnt0.write(|w| w.bits(0));
            // CS02:0 = 010, clk/8
            (*p).tccr0.write(|w| w.bits(0x02));
            // TOIE0
            (*p).timsk.modify(|r, w| w.bits(r.bits() | 0x01));
        }
        Self { _private: () }
    }

    pub fn now_us(&self) -> u32 {
        now_us()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined read of the overflow count and Timer0.
///
/// The hardware keeps counting while interrupts are masked, so an
/// overflow can slip between the two reads; the pending flag is checked
/// inside the critical section and folded in by hand.
pub fn now_us() -> u32 {
    interrupt::free(|cs| {
        let mut overflows = OVERFLOWS.borrow(cs).get();
        let mut count = unsafe { (*TC0::ptr()).tcnt0.read().bits() };
        let pending = unsafe { (*TC0::ptr()).tifr.read().bits() & 0x01 != 0 };
        if pending {
            // Unserviced overflow: the counter has wrapped since the
            // stored count was taken
            overflows = overflows.wrapping_add(1);
            count = unsafe { (*TC0::ptr()).tcnt0.read().bits() };
        }
        overflows
            .wrapping_mul(US_PER_OVERFLOW)
            .wrapping_add(count as u32 / 2)
    })
}

#[avr_device::interrupt(atmega128a)]
fn TIMER0_OVF() {
    interrupt::free(|cs| {
        let overflows = OVERFLOWS.borrow(cs);
        overflows.set(overflows.get().wrapping_add(1));
    });
}
