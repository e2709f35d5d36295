//! Configuration constants for the RC lighting controller

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate for the status console
pub const UART_BAUD: u32 = 115_200;

/// Shortest pulse accepted as a valid RC servo pulse, in microseconds
pub const PULSE_MIN_US: u16 = 1000;

/// Longest pulse accepted as a valid RC servo pulse, in microseconds
pub const PULSE_MAX_US: u16 = 2000;

/// Neutral/center pulse width, substituted for anything out of range
pub const PULSE_NEUTRAL_US: u16 = 1500;

/// On/off channel switches on strictly above this width; 1500 itself is off
pub const ONOFF_THRESHOLD_US: u16 = 1500;

/// Mapped brightness at or below this collapses to fully off, PWM duty
/// this low just reads as flicker on the LED
pub const BRIGHTNESS_OFF_MAX: u8 = 20;

/// Main loop period in microseconds (50 Hz, one RC frame)
pub const TICK_PERIOD_US: u32 = 20_000;

/// A channel with no edge for this long decays to the neutral sentinel.
/// Two nominal RC frames.
pub const SIGNAL_TIMEOUT_US: u32 = 40_000;

/// The RGB LED is wired common anode: drive levels are inverted
pub const RGB_COMMON_ANODE: bool = true;
