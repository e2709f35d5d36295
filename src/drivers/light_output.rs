//! Drives the three lighting outputs from a per-tick command.

use avr_device::atmega128a::{TC1, TC3};

use crate::color::Rgb;
use crate::config::RGB_COMMON_ANODE;
use crate::hal::gpio::board::{BlueLed, DimLed, GreenLed, RedLed, SwitchLed};
use crate::hal::pwm::{Pwm, PwmChannel, PwmFreq, PwmMode};
use crate::signal::LightCommand;

pub struct LightOutputs {
    onoff: SwitchLed,
    rgb_pwm: Pwm<TC1>,
    dim_pwm: Pwm<TC3>,
}

impl LightOutputs {
    /// Set up the output pins and both PWM timers. Everything starts
    /// dark until the first command is applied.
    pub fn new() -> Self {
        let onoff = SwitchLed::default().into_output();
        // The compare units only drive pins whose DDR bit is set
        let _ = DimLed::default().into_output();
        let _ = RedLed::default().into_output();
        let _ = GreenLed::default().into_output();
        let _ = BlueLed::default().into_output();

        let mut rgb_pwm = Pwm::<TC1>::new();
        rgb_pwm.configure(PwmFreq::Hz1000, PwmMode::Fast);
        let mut dim_pwm = Pwm::<TC3>::new();
        dim_pwm.configure(PwmFreq::Hz1000, PwmMode::Fast);

        let mut outputs = Self {
            onoff,
            rgb_pwm,
            dim_pwm,
        };
        outputs.all_dark();
        outputs
    }

    /// Apply one tick's command. The brightness value arrives with the
    /// low-end cutoff already folded in (0 means off), so it goes to the
    /// compare register as-is.
    pub fn apply(&mut self, cmd: &LightCommand, rgb: Rgb) {
        if cmd.on {
            self.onoff.set_high();
        } else {
            self.onoff.set_low();
        }

        self.dim_pwm.set_level(PwmChannel::Timer3A, cmd.brightness);

        self.rgb_pwm
            .set_level(PwmChannel::Timer1A, Self::drive_level(rgb.r));
        self.rgb_pwm
            .set_level(PwmChannel::Timer1B, Self::drive_level(rgb.g));
        self.rgb_pwm
            .set_level(PwmChannel::Timer1C, Self::drive_level(rgb.b));
    }

    /// Wiring polarity for the RGB die lives here and nowhere else: the
    /// color math upstream deals in plain intensities, common anode
    /// means the pin drives low for full brightness.
    pub fn drive_level(level: u8) -> u8 {
        if RGB_COMMON_ANODE {
            255 - level
        } else {
            level
        }
    }

    fn all_dark(&mut self) {
        self.onoff.set_low();
        self.dim_pwm.set_level(PwmChannel::Timer3A, 0);
        self.rgb_pwm
            .set_level(PwmChannel::Timer1A, Self::drive_level(0));
        self.rgb_pwm
            .set_level(PwmChannel::Timer1B, Self::drive_level(0));
        self.rgb_pwm
            .set_level(PwmChannel::Timer1C, Self::drive_level(0));
    }
}
