//! USART0 transmit path with an interrupt-drained ring buffer.
//!
//! The console only ever emits, so there is no receive machinery; the
//! UDRE interrupt trickles the buffer out while the main loop gets on
//! with its tick.

use avr_device::atmega128a::{USART0, USART1};
use avr_device::interrupt::{self, Mutex};
use core::cell::RefCell;
use core::convert::Infallible;
use core::marker::PhantomData;

// Buffer size must be a power of 2 for cheap index masking
const BUFFER_SIZE: usize = 64;
const BUFFER_MASK: usize = BUFFER_SIZE - 1;

// 115200 baud at 16 MHz with U2X: 2.1% error instead of -3.5% without
const UBRR_115200: u16 = 16;

// UCSR0A / UCSR0B bits this module touches
const U2X0: u8 = 0x02;
const TXEN0: u8 = 0x08;
const UDRIE0: u8 = 0x20;

struct Buffer {
    data: [u8; BUFFER_SIZE],
    write_idx: usize,
    read_idx: usize,
}

impl Buffer {
    const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
            write_idx: 0,
            read_idx: 0,
        }
    }

    fn write(&mut self, byte: u8) -> bool {
        let next_write = (self.write_idx + 1) & BUFFER_MASK;
        if next_write != self.read_idx {
            self.data[self.write_idx] = byte;
            self.write_idx = next_write;
            true
        } else {
            false
        }
    }

    fn read(&mut self) -> Option<u8> {
        if self.read_idx != self.write_idx {
            let byte = self.data[self.read_idx];
            self.read_idx = (self.read_idx + 1) & BUFFER_MASK;
            Some(byte)
        } else {
            None
        }
    }

    fn is_empty(&self) -> bool {
        self.read_idx == self.write_idx
    }
}

static TX_BUFFER: Mutex<RefCell<Buffer>> = Mutex::new(RefCell::new(Buffer::new()));

pub struct Uart<USART> {
    usart: PhantomData<USART>,
}

impl<USART: UartRegisterBlock> Uart<USART> {
    pub fn new() -> Self {
        unsafe {
            let p = USART::ptr();
            (*p).ubrr0h.write(|w| w.bits((UBRR_115200 >> 8) as u8));
            (*p).ubrr0l.write(|w| w.bits(UBRR_115200 as u8));
            (*p).ucsr0a.write(|w| w.bits(U2X0));
            // 8N1
            (*p).ucsr0c.write(|w| w.bits(0x06));
            (*p).ucsr0b.write(|w| w.bits(TXEN0));
        }

        Self { usart: PhantomData }
    }

    /// Queue one byte and kick the transmit interrupt. Returns false if
    /// the buffer had no room.
    fn try_push(&mut self, byte: u8) -> bool {
        interrupt::free(|cs| {
            if TX_BUFFER.borrow(cs).borrow_mut().write(byte) {
                unsafe {
                    (*USART::ptr()).ucsr0b.modify(|r, w| w.bits(r.bits() | UDRIE0));
                }
                true
            } else {
                false
            }
        })
    }

    /// Fire-and-forget write: a full buffer drops the byte rather than
    /// stalling the tick. At 115200 baud the buffer drains far faster
    /// than the status output fills it.
    pub fn write_byte(&mut self, byte: u8) {
        let _ = self.try_push(byte);
    }

    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }
}

impl<USART: UartRegisterBlock> embedded_hal::serial::Write<u8> for Uart<USART> {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        if self.try_push(word) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        let empty = interrupt::free(|cs| TX_BUFFER.borrow(cs).borrow().is_empty());
        if empty {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl<USART: UartRegisterBlock> Default for Uart<USART> {
    fn default() -> Self {
        Self::new()
    }
}

// Trait for USART register block access
pub trait UartRegisterBlock {
    fn ptr() -> *mut avr_device::atmega128a::usart0::RegisterBlock;
}

impl UartRegisterBlock for USART0 {
    fn ptr() -> *mut avr_device::atmega128a::usart0::RegisterBlock {
        USART0::ptr() as *mut _
    }
}

// Same register layout, different base address
impl UartRegisterBlock for USART1 {
    fn ptr() -> *mut avr_device::atmega128a::usart0::RegisterBlock {
        USART1::ptr() as *mut _
    }
}

#[avr_device::interrupt(atmega128a)]
fn USART0_UDRE() {
    interrupt::free(|cs| {
        if let Some(byte) = TX_BUFFER.borrow(cs).borrow_mut().read() {
            unsafe {
                (*USART0::ptr()).udr0.write(|w| w.bits(byte));
            }
        } else {
            // Buffer empty, stop asking
            unsafe {
                (*USART0::ptr())
                    .ucsr0b
                    .modify(|r, w| w.bits(r.bits() & !UDRIE0));
            }
        }
    });
}
