use avr_device::atmega128a::CPU;

/// Sleep mode encodings for the MCUCR SM2:0 bits (bit2, bit4, bit3)
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum SleepMode {
    Idle = 0x00,
    AdcNoiseReduction = 0x08,
    PowerDown = 0x10,
    PowerSave = 0x18,
    Standby = 0x14,
    ExtendedStandby = 0x1C,
}

const SM_MASK: u8 = 0x1C;
const SE: u8 = 0x20;

pub struct Power {
    _private: (),
}

impl Power {
    pub fn new() -> Self {
        Self { _private: () }
    }

    #[inline]
    pub fn set_sleep_mode(&mut self, mode: SleepMode) {
        unsafe {
            let p = CPU::ptr();
            (*p).mcucr
                .modify(|r, w| w.bits((r.bits() & !SM_MASK) | (mode as u8)));
        }
    }

    #[inline]
    fn sleep(&mut self) {
        unsafe {
            let p = CPU::ptr();
            (*p).mcucr.modify(|r, w| w.bits(r.bits() | SE));
            avr_device::asm::sleep();
            (*p).mcucr.modify(|r, w| w.bits(r.bits() & !SE));
        }
    }

    /// Idle until the next interrupt. Timer0 overflows every 128 us, so
    /// this never oversleeps a tick deadline by more than that.
    pub fn enter_idle_mode(&mut self) {
        self.set_sleep_mode(SleepMode::Idle);
        self.sleep();
    }
}

impl Default for Power {
    fn default() -> Self {
        Self::new()
    }
}
