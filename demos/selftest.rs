//! On-target self-test for the conversion pipeline. Flash, open the
//! serial console at 115200 and read the verdicts.

#![no_std]
#![no_main]

use panic_halt as _;

use avr_device::atmega128::Peripherals;
use rclight_firmware::capture::{ChannelBank, ChannelId};
use rclight_firmware::color::{hsv_to_rgb, Rgb};
use rclight_firmware::drivers::LightOutputs;
use rclight_firmware::signal::{self, brightness_from_pulse, hue_from_pulse};
use rclight_firmware::testing::{TestCase, TestResult, TestRunner};
use rclight_firmware::{check, check_eq};

/// One pulse per channel starting at t=10ms, snapshot taken at t=20ms.
fn bank_with(widths: [u32; 3]) -> ChannelBank {
    let mut bank = ChannelBank::new();
    for (i, id) in [ChannelId::OnOff, ChannelId::Brightness, ChannelId::Hue]
        .into_iter()
        .enumerate()
    {
        let ch = bank.channel_mut(id);
        ch.record_edge(true, 10_000);
        ch.record_edge(false, 10_000 + widths[i]);
    }
    bank
}

struct WindowBounds;
impl TestCase for WindowBounds {
    fn name(&self) -> &'static str {
        "window bounds stored exactly"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([1000, 2000, 1500]);
        let snap = bank.snapshot(20_000);
        check_eq!(snap.width(ChannelId::OnOff), 1000);
        check_eq!(snap.width(ChannelId::Brightness), 2000);
        check_eq!(snap.width(ChannelId::Hue), 1500);
        TestResult::Pass
    }
}

struct GlitchRejected;
impl TestCase for GlitchRejected {
    fn name(&self) -> &'static str {
        "out-of-window pulse becomes neutral"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([400, 2500, 999]);
        let snap = bank.snapshot(20_000);
        check_eq!(snap.width(ChannelId::OnOff), 1500);
        check_eq!(snap.width(ChannelId::Brightness), 1500);
        check_eq!(snap.width(ChannelId::Hue), 1500);
        // rejected pulses still count as observed
        check!(snap.is_fresh(ChannelId::OnOff));
        TestResult::Pass
    }
}

struct RisingOnlySilent;
impl TestCase for RisingOnlySilent {
    fn name(&self) -> &'static str {
        "rising edge alone produces nothing"
    }

    fn run(&self) -> TestResult {
        let mut bank = ChannelBank::new();
        bank.channel_mut(ChannelId::Hue).record_edge(true, 5_000);
        let snap = bank.snapshot(6_000);
        check!(!snap.is_fresh(ChannelId::Hue));
        check_eq!(snap.width(ChannelId::Hue), 1500);
        TestResult::Pass
    }
}

struct SnapshotIsolation;
impl TestCase for SnapshotIsolation {
    fn name(&self) -> &'static str {
        "late edge waits for the next snapshot"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([1700, 1500, 1500]);
        let first = bank.snapshot(20_000);
        check_eq!(first.width(ChannelId::OnOff), 1700);

        let ch = bank.channel_mut(ChannelId::OnOff);
        ch.record_edge(true, 30_000);
        ch.record_edge(false, 31_900);
        let second = bank.snapshot(40_000);
        check_eq!(second.width(ChannelId::OnOff), 1900);
        check!(second.is_fresh(ChannelId::OnOff));
        TestResult::Pass
    }
}

struct SnapshotClearsFresh;
impl TestCase for SnapshotClearsFresh {
    fn name(&self) -> &'static str {
        "snapshot consumes freshness"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([1500, 1500, 1500]);
        check!(bank.snapshot(20_000).any_fresh());
        check!(!bank.snapshot(40_000).any_fresh());
        TestResult::Pass
    }
}

struct OnOffBoundary;
impl TestCase for OnOffBoundary {
    fn name(&self) -> &'static str {
        "1500 is off, 1501 is on"
    }

    fn run(&self) -> TestResult {
        let mut at_center = bank_with([1500, 1500, 1500]);
        check!(!signal::condition(&at_center.snapshot(20_000)).on);
        let mut just_above = bank_with([1501, 1500, 1500]);
        check!(signal::condition(&just_above.snapshot(20_000)).on);
        TestResult::Pass
    }
}

struct BrightnessMap;
impl TestCase for BrightnessMap {
    fn name(&self) -> &'static str {
        "brightness endpoints and midpoint"
    }

    fn run(&self) -> TestResult {
        check_eq!(brightness_from_pulse(1000), 0);
        check_eq!(brightness_from_pulse(1500), 128);
        check_eq!(brightness_from_pulse(2000), 255);
        TestResult::Pass
    }
}

struct BrightnessCutoff;
impl TestCase for BrightnessCutoff {
    fn name(&self) -> &'static str {
        "dim values collapse to off"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([1500, 1078, 1500]);
        check_eq!(signal::condition(&bank.snapshot(20_000)).brightness, 0);
        let mut brighter = bank_with([1500, 1083, 1500]);
        check_eq!(signal::condition(&brighter.snapshot(20_000)).brightness, 21);
        TestResult::Pass
    }
}

struct HueMap;
impl TestCase for HueMap {
    fn name(&self) -> &'static str {
        "hue endpoints"
    }

    fn run(&self) -> TestResult {
        check_eq!(hue_from_pulse(1000), 0);
        check_eq!(hue_from_pulse(1500), 180);
        check_eq!(hue_from_pulse(2000), 360);
        TestResult::Pass
    }
}

struct StaleNeutral;
impl TestCase for StaleNeutral {
    fn name(&self) -> &'static str {
        "silent channel decays to neutral"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([2000, 2000, 2000]);
        // 90 ms after the last edge, well past the 40 ms timeout
        let cmd = signal::condition(&bank.snapshot(101_500));
        check!(!cmd.on);
        check_eq!(cmd.brightness, 128);
        TestResult::Pass
    }
}

struct Primaries;
impl TestCase for Primaries {
    fn name(&self) -> &'static str {
        "hue 0/120/240 hit the primaries"
    }

    fn run(&self) -> TestResult {
        check_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb { r: 255, g: 0, b: 0 });
        check_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb { r: 0, g: 255, b: 0 });
        check_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb { r: 0, g: 0, b: 255 });
        TestResult::Pass
    }
}

struct Secondaries;
impl TestCase for Secondaries {
    fn name(&self) -> &'static str {
        "hue 60/300 saturate two channels"
    }

    fn run(&self) -> TestResult {
        check_eq!(
            hsv_to_rgb(60.0, 1.0, 1.0),
            Rgb {
                r: 255,
                g: 255,
                b: 0
            }
        );
        check_eq!(
            hsv_to_rgb(300.0, 1.0, 1.0),
            Rgb {
                r: 255,
                g: 0,
                b: 255
            }
        );
        TestResult::Pass
    }
}

struct Wrap360;
impl TestCase for Wrap360 {
    fn name(&self) -> &'static str {
        "hue 360 wraps to red"
    }

    fn run(&self) -> TestResult {
        check_eq!(hsv_to_rgb(360.0, 1.0, 1.0), Rgb { r: 255, g: 0, b: 0 });
        TestResult::Pass
    }
}

struct DriverPolarity;
impl TestCase for DriverPolarity {
    fn name(&self) -> &'static str {
        "common-anode drive levels invert"
    }

    fn run(&self) -> TestResult {
        check_eq!(LightOutputs::drive_level(255), 0);
        check_eq!(LightOutputs::drive_level(0), 255);
        check_eq!(LightOutputs::drive_level(100), 155);
        TestResult::Pass
    }
}

struct ScenarioFullRed;
impl TestCase for ScenarioFullRed {
    fn name(&self) -> &'static str {
        "1800/1500/1000 gives mid red, switch on"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([1800, 1500, 1000]);
        let cmd = signal::condition(&bank.snapshot(20_000));
        check!(cmd.on);
        check_eq!(cmd.brightness, 128);
        check_eq!(cmd.hue_deg, 0);

        let rgb = hsv_to_rgb(cmd.hue_deg as f32, 1.0, 1.0);
        check_eq!(rgb, Rgb { r: 255, g: 0, b: 0 });
        check_eq!(LightOutputs::drive_level(rgb.r), 0);
        check_eq!(LightOutputs::drive_level(rgb.g), 255);
        check_eq!(LightOutputs::drive_level(rgb.b), 255);
        TestResult::Pass
    }
}

struct ScenarioDimWrap;
impl TestCase for ScenarioDimWrap {
    fn name(&self) -> &'static str {
        "1200/1010/2000 gives cut-off red, switch off"
    }

    fn run(&self) -> TestResult {
        let mut bank = bank_with([1200, 1010, 2000]);
        let cmd = signal::condition(&bank.snapshot(20_000));
        check!(!cmd.on);
        check_eq!(cmd.brightness, 0);
        check_eq!(cmd.hue_deg, 360);

        let rgb = hsv_to_rgb(cmd.hue_deg as f32, 1.0, 1.0);
        check_eq!(rgb, Rgb { r: 255, g: 0, b: 0 });
        TestResult::Pass
    }
}

#[avr_device::entry]
fn main() -> ! {
    let _dp = Peripherals::take().unwrap();

    // serial TX drains on the UDRE interrupt
    unsafe { avr_device::interrupt::enable() };

    let mut runner = TestRunner::new();
    runner.run_suite(
        "capture",
        &[
            &WindowBounds,
            &GlitchRejected,
            &RisingOnlySilent,
            &SnapshotIsolation,
            &SnapshotClearsFresh,
        ],
    );
    runner.run_suite(
        "signal",
        &[
            &OnOffBoundary,
            &BrightnessMap,
            &BrightnessCutoff,
            &HueMap,
            &StaleNeutral,
        ],
    );
    runner.run_suite("color", &[&Primaries, &Secondaries, &Wrap360, &DriverPolarity]);
    runner.run_suite("end_to_end", &[&ScenarioFullRed, &ScenarioDimWrap]);
    runner.summary();

    loop {}
}
