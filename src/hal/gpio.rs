use avr_device::atmega128a::{PORTA, PORTB, PORTC, PORTD, PORTE, PORTF};
use core::convert::Infallible;
use core::marker::PhantomData;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Debug)]
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

macro_rules! impl_port {
    ($PORT:ident, $ddr:ident, $port:ident, $pin:ident) => {
        impl<const P: u8, MODE: PinMode> Default for Pin<$PORT, P, MODE> {
            fn default() -> Self {
                Self {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }
        }

        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                // Set DDRx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }

            pub fn into_input(self) -> Pin<$PORT, P, Input> {
                // Clear DDRx bit and disable pull-up
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Pin {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }

            pub fn into_pull_up_input(self) -> Pin<$PORT, P, Input> {
                // Clear DDRx bit, set PORTx bit for the internal pull-up
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }
        }

        impl<const P: u8> Pin<$PORT, P, Output> {
            #[inline]
            pub fn set_high(&mut self) {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
            }

            #[inline]
            pub fn set_low(&mut self) {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
            }

            #[inline]
            pub fn toggle(&mut self) {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() ^ (1 << P)));
                }
            }
        }

        impl<const P: u8> Pin<$PORT, P, Input> {
            #[inline]
            pub fn is_high(&self) -> bool {
                unsafe { (*$PORT::ptr()).$pin.read().bits() & (1 << P) != 0 }
            }

            #[inline]
            pub fn is_low(&self) -> bool {
                !self.is_high()
            }
        }

        impl<const P: u8> embedded_hal::digital::v2::OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            fn set_high(&mut self) -> Result<(), Infallible> {
                Pin::set_high(self);
                Ok(())
            }

            fn set_low(&mut self) -> Result<(), Infallible> {
                Pin::set_low(self);
                Ok(())
            }
        }

        impl<const P: u8> embedded_hal::digital::v2::InputPin for Pin<$PORT, P, Input> {
            type Error = Infallible;

            fn is_high(&self) -> Result<bool, Infallible> {
                Ok(Pin::is_high(self))
            }

            fn is_low(&self) -> Result<bool, Infallible> {
                Ok(Pin::is_low(self))
            }
        }
    };
}

// Implement for all ATmega128 ports
impl_port!(PORTA, ddra, porta, pina);
impl_port!(PORTB, ddrb, portb, pinb);
impl_port!(PORTC, ddrc, portc, pinc);
impl_port!(PORTD, ddrd, portd, pind);
impl_port!(PORTE, ddre, porte, pine);
impl_port!(PORTF, ddrf, portf, pinf);

// Board pin map for the lighting controller
pub mod board {
    use super::*;

    // RC receiver inputs, PORTE so INT4..INT6 can watch them
    pub type Ch7 = Pin<PORTE, 4, Input>; // on/off channel
    pub type Ch3 = Pin<PORTE, 5, Input>; // brightness channel
    pub type Ch2 = Pin<PORTE, 6, Input>; // hue channel

    // Lighting outputs
    pub type SwitchLed = Pin<PORTA, 0, Output>; // single-color on/off
    pub type DimLed = Pin<PORTE, 3, Output>; // OC3A, brightness PWM
    pub type RedLed = Pin<PORTB, 5, Output>; // OC1A
    pub type GreenLed = Pin<PORTB, 6, Output>; // OC1B
    pub type BlueLed = Pin<PORTB, 7, Output>; // OC1C
}
