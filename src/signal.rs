//! Turns receiver snapshots into lighting commands.
//!
//! Pure integer conversions; the snapshot carries everything needed, so
//! one snapshot deterministically yields one command.

use crate::capture::{ChannelId, Snapshot};
use crate::config::{
    BRIGHTNESS_OFF_MAX, ONOFF_THRESHOLD_US, PULSE_MAX_US, PULSE_MIN_US, PULSE_NEUTRAL_US,
    SIGNAL_TIMEOUT_US,
};

/// Fully derived per-tick command, consumed by the output driver.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LightCommand {
    pub on: bool,
    pub brightness: u8,
    pub hue_deg: u16,
}

/// Derive the tick's command from a snapshot.
pub fn condition(snap: &Snapshot) -> LightCommand {
    let w_on = effective_width(snap, ChannelId::OnOff);
    let w_bright = effective_width(snap, ChannelId::Brightness);
    let w_hue = effective_width(snap, ChannelId::Hue);

    let brightness = {
        let b = brightness_from_pulse(w_bright);
        if b <= BRIGHTNESS_OFF_MAX {
            0
        } else {
            b
        }
    };

    LightCommand {
        on: w_on > ONOFF_THRESHOLD_US,
        brightness,
        hue_deg: hue_from_pulse(w_hue),
    }
}

/// A channel that stopped pulsing decays to neutral instead of freezing
/// at whatever it last measured.
fn effective_width(snap: &Snapshot, id: ChannelId) -> u16 {
    if snap.edge_age(id) > SIGNAL_TIMEOUT_US {
        PULSE_NEUTRAL_US
    } else {
        snap.width(id)
    }
}

/// Linear map of the servo window onto 0..=255, rounded to nearest.
///
/// Inputs are clamped to the window first; capture already bounds them
/// but this path must not depend on that.
pub fn brightness_from_pulse(width_us: u16) -> u8 {
    let w = width_us.clamp(PULSE_MIN_US, PULSE_MAX_US) as u32;
    let span = (PULSE_MAX_US - PULSE_MIN_US) as u32;
    (((w - PULSE_MIN_US as u32) * 255 + span / 2) / span) as u8
}

/// Linear map of the servo window onto 0..=360 degrees. The color mixer
/// wraps 360 back onto 0.
pub fn hue_from_pulse(width_us: u16) -> u16 {
    let w = width_us.clamp(PULSE_MIN_US, PULSE_MAX_US) as u32;
    let span = (PULSE_MAX_US - PULSE_MIN_US) as u32;
    ((w - PULSE_MIN_US as u32) * 360 / span) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CHANNEL_COUNT;

    fn live_snapshot(widths: [u16; CHANNEL_COUNT]) -> Snapshot {
        Snapshot {
            width_us: widths,
            fresh: [true; CHANNEL_COUNT],
            edge_age_us: [1_000; CHANNEL_COUNT],
        }
    }

    #[test]
    fn onoff_threshold_is_exclusive() {
        assert!(!condition(&live_snapshot([1500, 1500, 1500])).on);
        assert!(condition(&live_snapshot([1501, 1500, 1500])).on);
        assert!(!condition(&live_snapshot([1000, 1500, 1500])).on);
        assert!(condition(&live_snapshot([2000, 1500, 1500])).on);
    }

    #[test]
    fn brightness_endpoints() {
        assert_eq!(brightness_from_pulse(1000), 0);
        assert_eq!(brightness_from_pulse(2000), 255);
        assert_eq!(brightness_from_pulse(1500), 128);
    }

    #[test]
    fn brightness_is_monotonic() {
        let mut prev = brightness_from_pulse(1000);
        for w in 1001..=2000 {
            let b = brightness_from_pulse(w);
            assert!(b >= prev, "brightness dipped at {} us", w);
            prev = b;
        }
    }

    #[test]
    fn brightness_clamps_out_of_window_inputs() {
        assert_eq!(brightness_from_pulse(0), 0);
        assert_eq!(brightness_from_pulse(900), 0);
        assert_eq!(brightness_from_pulse(2100), 255);
        assert_eq!(brightness_from_pulse(u16::MAX), 255);
    }

    #[test]
    fn dim_brightness_collapses_to_off() {
        // 1078 us maps to 20, the last value inside the cutoff
        assert_eq!(brightness_from_pulse(1078), 20);
        assert_eq!(condition(&live_snapshot([1500, 1078, 1500])).brightness, 0);
        // one step past the cutoff passes through
        let cmd = condition(&live_snapshot([1500, 1083, 1500]));
        assert_eq!(cmd.brightness, 21);
    }

    #[test]
    fn hue_endpoints_and_monotonic() {
        assert_eq!(hue_from_pulse(1000), 0);
        assert_eq!(hue_from_pulse(2000), 360);
        let mut prev = hue_from_pulse(1000);
        for w in 1001..=2000 {
            let h = hue_from_pulse(w);
            assert!(h >= prev, "hue dipped at {} us", w);
            prev = h;
        }
    }

    #[test]
    fn stale_channel_decays_to_neutral() {
        let mut snap = live_snapshot([2000, 2000, 2000]);
        snap.edge_age_us[ChannelId::OnOff as usize] = SIGNAL_TIMEOUT_US + 1;
        let cmd = condition(&snap);
        // stale on/off reads as neutral (off); the others still count
        assert!(!cmd.on);
        assert_eq!(cmd.brightness, 255);
    }

    #[test]
    fn timeout_boundary_is_exclusive() {
        let mut snap = live_snapshot([2000, 1500, 1500]);
        snap.edge_age_us[ChannelId::OnOff as usize] = SIGNAL_TIMEOUT_US;
        assert!(condition(&snap).on);
    }

    #[test]
    fn scenario_full_red() {
        // on/off 1800, brightness 1500, hue 1000
        let cmd = condition(&live_snapshot([1800, 1500, 1000]));
        assert_eq!(
            cmd,
            LightCommand {
                on: true,
                brightness: 128,
                hue_deg: 0
            }
        );
    }

    #[test]
    fn scenario_dim_wraps_to_red() {
        // on/off 1200, brightness 1010 (maps to 3, cut off), hue 2000
        let cmd = condition(&live_snapshot([1200, 1010, 2000]));
        assert_eq!(
            cmd,
            LightCommand {
                on: false,
                brightness: 0,
                hue_deg: 360
            }
        );
    }
}
