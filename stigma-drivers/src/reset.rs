//! Reset line driven from a GPIO output

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use stigma_hal::ResetLine;

use crate::error::{BusError, Line};

/// How long RST is held low
pub const RESET_PULSE_MS: u32 = 100;

/// RST pin with a blocking delay
pub struct PinReset<RST, D> {
    rst: RST,
    delay: D,
    pulse_ms: u32,
}

impl<RST, D> PinReset<RST, D> {
    pub fn new(rst: RST, delay: D) -> Self {
        Self {
            rst,
            delay,
            pulse_ms: RESET_PULSE_MS,
        }
    }

    /// Hold RST low for `ms` instead of the default
    pub fn with_pulse_ms(mut self, ms: u32) -> Self {
        self.pulse_ms = ms;
        self
    }

    pub fn release(self) -> (RST, D) {
        (self.rst, self.delay)
    }
}

impl<RST: OutputPin, D: DelayNs> ResetLine for PinReset<RST, D> {
    type Error = BusError;

    fn pulse(&mut self) -> Result<(), Self::Error> {
        let line = |_| BusError::Pin(Line::Reset);

        self.rst.set_high().map_err(line)?;
        self.rst.set_low().map_err(line)?;
        self.delay.delay_ms(self.pulse_ms);
        self.rst.set_high().map_err(line)
    }
}
