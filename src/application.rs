//! Per-tick application logic: sample the receiver, derive the lighting
//! command, drive the outputs, report.

use ufmt::uwriteln;

use crate::capture::ChannelId;
use crate::color;
use crate::drivers::{LightOutputs, RcReceiver, SerialConsole};
use crate::signal;

pub struct Application {
    _private: (),
}

impl Application {
    pub fn new() -> Self {
        Self { _private: () }
    }

    pub fn update(
        &mut self,
        receiver: &mut RcReceiver,
        lights: &mut LightOutputs,
        console: &mut SerialConsole,
    ) {
        let snap = receiver.snapshot();
        let cmd = signal::condition(&snap);
        let rgb = color::hsv_to_rgb(cmd.hue_deg as f32, 1.0, 1.0);
        lights.apply(&cmd, rgb);

        // Status line only when the receiver actually produced new data
        // this tick; an idle link stays quiet
        if snap.any_fresh() {
            let _ = uwriteln!(
                console,
                "pw {} {} {} -> hue {} bright {}",
                snap.width(ChannelId::OnOff),
                snap.width(ChannelId::Brightness),
                snap.width(ChannelId::Hue),
                cmd.hue_deg,
                cmd.brightness
            );
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
