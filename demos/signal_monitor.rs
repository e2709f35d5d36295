//! Live receiver monitor: prints raw pulse widths and the derived
//! command twice a second. Handy when trimming a transmitter.

#![no_std]
#![no_main]

use panic_halt as _;

use avr_device::atmega128::Peripherals;
use ufmt::uwriteln;

use rclight_firmware::capture::ChannelId;
use rclight_firmware::drivers::{RcReceiver, SerialConsole};
use rclight_firmware::hal::{Clock, Power};
use rclight_firmware::os::TickLoop;
use rclight_firmware::signal;

#[avr_device::entry]
fn main() -> ! {
    let _dp = Peripherals::take().unwrap();

    let clock = Clock::new();
    let mut receiver = RcReceiver::new();
    let mut console = SerialConsole::new();
    let mut power = Power::new();

    unsafe { avr_device::interrupt::enable() };

    console.write_line("signal monitor: raw widths and derived command, 2 Hz");

    let mut ticker = TickLoop::new(&clock, 500_000);

    loop {
        let snap = receiver.snapshot();
        let cmd = signal::condition(&snap);
        let _ = uwriteln!(
            &mut console,
            "pw {} {} {} fresh {} -> on {} bright {} hue {}",
            snap.width(ChannelId::OnOff),
            snap.width(ChannelId::Brightness),
            snap.width(ChannelId::Hue),
            snap.any_fresh() as u8,
            cmd.on as u8,
            cmd.brightness,
            cmd.hue_deg
        );
        ticker.wait(&clock, &mut power);
    }
}
