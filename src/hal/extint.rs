//! External interrupt configuration for the RC input pins.
//!
//! Only INT4..INT7 support any-logical-change sense on the ATmega128,
//! which is why the receiver channels sit on PORTE.

use avr_device::atmega128a::EXINT;

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum ExtIntLine {
    Int4 = 4,
    Int5 = 5,
    Int6 = 6,
    Int7 = 7,
}

pub struct ExtInt {
    _private: (),
}

impl ExtInt {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Switch a line to any-logical-change sense (ISCn = 01 in EICRB)
    /// and unmask it.
    pub fn enable_any_change(&mut self, line: ExtIntLine) {
        let shift = (line as u8 - 4) * 2;
        unsafe {
            let p = EXINT::ptr();
            (*p).eicrb
                .modify(|r, w| w.bits((r.bits() & !(0b11 << shift)) | (0b01 << shift)));
            (*p).eimsk.modify(|r, w| w.bits(r.bits() | (1 << (line as u8))));
        }
    }

    pub fn disable(&mut self, line: ExtIntLine) {
        unsafe {
            (*EXINT::ptr())
                .eimsk
                .modify(|r, w| w.bits(r.bits() & !(1 << (line as u8))));
        }
    }
}

impl Default for ExtInt {
    fn default() -> Self {
        Self::new()
    }
}
