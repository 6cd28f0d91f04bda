use embedded_hal::{
    blocking::delay::DelayMs,
    digital::v2::OutputPin,
};

use crate::consts::{BLINK_OFF_MS, BLINK_ON_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkConfig {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self { on_ms: BLINK_ON_MS, off_ms: BLINK_OFF_MS }
    }
}

/// The only thing the user gets to see: one LED, active high.
///
/// Solid means the run finished. Blinking means we refused to start.
pub struct StatusLed<LED, DL> {
    led: LED,
    delay: DL,
    config: BlinkConfig,
}

impl<LED, DL> StatusLed<LED, DL>
where
    LED: OutputPin,
    DL: DelayMs<u32>,
{
    pub fn new(mut led: LED, delay: DL, config: BlinkConfig) -> Self {
        led.set_low().ok();
        Self { led, delay, config }
    }

    /// One on/off period.
    pub fn blink(&mut self) {
        self.led.set_high().ok();
        self.delay.delay_ms(self.config.on_ms);
        self.led.set_low().ok();
        self.delay.delay_ms(self.config.off_ms);
    }

    pub fn signal_done(mut self) -> ! {
        sav_log!(info, "done!");
        self.led.set_high().ok();
        crate::park()
    }

    pub fn signal_panic(mut self) -> ! {
        sav_log!(error, "halting, blinking forever");
        loop {
            self.blink();
        }
    }
}
