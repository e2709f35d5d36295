#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use avr_device::atmega128a::Peripherals;
#[cfg(target_arch = "avr")]
use rclight_firmware::application::Application;
#[cfg(target_arch = "avr")]
use rclight_firmware::config::TICK_PERIOD_US;
#[cfg(target_arch = "avr")]
use rclight_firmware::drivers::{LightOutputs, RcReceiver, SerialConsole};
#[cfg(target_arch = "avr")]
use rclight_firmware::hal::{Clock, Power, Watchdog, WatchdogTimeout};
#[cfg(target_arch = "avr")]
use rclight_firmware::os::TickLoop;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    // Claiming the peripherals asserts sole ownership of the hardware;
    // the HAL modules work through their own register handles after this
    let _dp = Peripherals::take().unwrap();

    let clock = Clock::new();
    let mut receiver = RcReceiver::new();
    let mut lights = LightOutputs::new();
    let mut console = SerialConsole::new();
    let mut power = Power::new();
    let mut watchdog = Watchdog::new();
    let mut app = Application::new();

    // Capture, clock and serial TX all run on interrupts from here on
    unsafe { avr_device::interrupt::enable() };

    console.write_line("rclight firmware v0.1.0");

    watchdog.start(WatchdogTimeout::Ms250);
    let mut ticker = TickLoop::new(&clock, TICK_PERIOD_US);

    loop {
        watchdog.feed();
        app.update(&mut receiver, &mut lights, &mut console);
        ticker.wait(&clock, &mut power);
    }
}

// The firmware entry only exists for the AVR target; host builds are for
// the unit tests in the library.
#[cfg(not(target_arch = "avr"))]
fn main() {}
