//! RC PWM lighting controller for ATmega128 boards.
//!
//! Three receiver channels come in as 1000-2000 us servo pulses on
//! INT4..INT6 and leave as light: an on/off LED, a dimmable LED and a
//! common-anode RGB LED whose hue tracks one channel. Capture runs in
//! interrupt context; the main loop samples a consistent snapshot of
//! all channels once per 20 ms tick and converts it to output levels.
//!
//! The conversion pipeline (`capture`, `signal`, `color`) is pure and
//! carries its own unit tests; everything that touches ATmega128
//! registers is compiled for the AVR target only.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod capture;
pub mod color;
pub mod config;
pub mod signal;

#[cfg(target_arch = "avr")]
pub mod application;
#[cfg(target_arch = "avr")]
pub mod drivers;
#[cfg(target_arch = "avr")]
pub mod hal;
#[cfg(target_arch = "avr")]
pub mod os;
#[cfg(target_arch = "avr")]
pub mod testing;
