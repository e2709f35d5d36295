pub mod extint;
pub mod gpio;
pub mod power;
pub mod pwm;
pub mod timer;
pub mod uart;
pub mod watchdog;

// Re-export commonly used types
pub use extint::{ExtInt, ExtIntLine};
pub use gpio::board;
pub use gpio::{Input, Output, Pin};
pub use power::Power;
pub use pwm::{Pwm, PwmChannel, PwmFreq, PwmMode};
pub use timer::Clock;
pub use uart::Uart;
pub use watchdog::{Watchdog, WatchdogTimeout};
