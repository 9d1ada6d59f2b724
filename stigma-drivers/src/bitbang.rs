//! Bit-banged serial transport
//!
//! Clocks bytes out on four GPIO outputs, the way the panel's datasheet
//! timing diagram draws it: D/C settles, SCE falls, then for each bit
//! (MSB first) SDIN is set while SCLK is low and latched on the rising
//! edge. SCE rises again after the last byte of each call.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use stigma_hal::{ByteKind, Transport};

use crate::error::{BusError, Line};

/// Half of the shortest SCLK period the PCD8544 accepts (4 MHz)
pub const HALF_PERIOD_NS: u32 = 125;

/// Software-clocked transport over GPIO outputs
pub struct BitBangTransport<SCLK, SDIN, DC, SCE, D> {
    sclk: SCLK,
    sdin: SDIN,
    dc: DC,
    sce: SCE,
    delay: D,
    half_period_ns: u32,
}

impl<SCLK, SDIN, DC, SCE, D> BitBangTransport<SCLK, SDIN, DC, SCE, D> {
    /// Wrap the four interface pins and a delay for clock timing
    ///
    /// Pins are not driven until the first transfer.
    pub fn new(sclk: SCLK, sdin: SDIN, dc: DC, sce: SCE, delay: D) -> Self {
        Self {
            sclk,
            sdin,
            dc,
            sce,
            delay,
            half_period_ns: HALF_PERIOD_NS,
        }
    }

    /// Slow the clock down, e.g. for long wires
    pub fn with_half_period_ns(mut self, ns: u32) -> Self {
        self.half_period_ns = ns.max(HALF_PERIOD_NS);
        self
    }

    /// Give back the pins and delay
    pub fn release(self) -> (SCLK, SDIN, DC, SCE, D) {
        (self.sclk, self.sdin, self.dc, self.sce, self.delay)
    }
}

impl<SCLK, SDIN, DC, SCE, D> BitBangTransport<SCLK, SDIN, DC, SCE, D>
where
    SCLK: OutputPin,
    SDIN: OutputPin,
    DC: OutputPin,
    SCE: OutputPin,
    D: DelayNs,
{
    fn select(&mut self, kind: ByteKind) -> Result<(), BusError> {
        self.sclk
            .set_low()
            .map_err(|_| BusError::Pin(Line::Clock))?;
        self.dc
            .set_state(PinState::from(kind.dc_level()))
            .map_err(|_| BusError::Pin(Line::DataCommand))?;
        self.sce
            .set_low()
            .map_err(|_| BusError::Pin(Line::ChipEnable))
    }

    fn deselect(&mut self) -> Result<(), BusError> {
        self.sce
            .set_high()
            .map_err(|_| BusError::Pin(Line::ChipEnable))
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), BusError> {
        for bit in (0..8).rev() {
            let level = PinState::from(byte & (1 << bit) != 0);
            self.sdin
                .set_state(level)
                .map_err(|_| BusError::Pin(Line::Data))?;
            self.delay.delay_ns(self.half_period_ns);
            self.sclk
                .set_high()
                .map_err(|_| BusError::Pin(Line::Clock))?;
            self.delay.delay_ns(self.half_period_ns);
            self.sclk
                .set_low()
                .map_err(|_| BusError::Pin(Line::Clock))?;
        }
        Ok(())
    }
}

impl<SCLK, SDIN, DC, SCE, D> Transport for BitBangTransport<SCLK, SDIN, DC, SCE, D>
where
    SCLK: OutputPin,
    SDIN: OutputPin,
    DC: OutputPin,
    SCE: OutputPin,
    D: DelayNs,
{
    type Error = BusError;

    fn send(&mut self, kind: ByteKind, byte: u8) -> Result<(), Self::Error> {
        self.send_all(kind, &[byte])
    }

    /// Keeps SCE low for the whole run
    fn send_all(&mut self, kind: ByteKind, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() {
            return Ok(());
        }

        self.select(kind)?;
        let sent = bytes.iter().try_for_each(|&byte| self.shift_out(byte));
        // Release the bus even if a bit failed
        let released = self.deselect();
        sent.and(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, Wire};
    use stigma_core::mock::MockReset;
    use stigma_core::{ChipVariant, Pcd8544};

    fn transport(
        wire: &Wire,
    ) -> BitBangTransport<
        crate::testing::WirePin,
        crate::testing::WirePin,
        crate::testing::WirePin,
        crate::testing::WirePin,
        crate::testing::WireDelay,
    > {
        BitBangTransport::new(
            wire.pin(Line::Clock),
            wire.pin(Line::Data),
            wire.pin(Line::DataCommand),
            wire.pin(Line::ChipEnable),
            wire.delay(),
        )
    }

    #[test]
    fn test_command_byte_msb_first() {
        let wire = Wire::new();
        let mut bus = transport(&wire);

        bus.send(ByteKind::Command, 0x21).unwrap();

        assert_eq!(wire.decode(), vec![(ByteKind::Command, 0x21)]);

        let data_bits: Vec<bool> = wire
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::Pin(Line::Data, level) => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(
            data_bits,
            vec![false, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_frame_order() {
        let wire = Wire::new();
        let mut bus = transport(&wire);

        bus.send(ByteKind::Data, 0xFF).unwrap();

        let events = wire.events();
        // Clock parked low, D/C high for data, then chip enable asserted
        assert_eq!(events[0], Event::Pin(Line::Clock, false));
        assert_eq!(events[1], Event::Pin(Line::DataCommand, true));
        assert_eq!(events[2], Event::Pin(Line::ChipEnable, false));
        assert_eq!(events.last(), Some(&Event::Pin(Line::ChipEnable, true)));
    }

    #[test]
    fn test_send_all_holds_chip_enable() {
        let wire = Wire::new();
        let mut bus = transport(&wire);

        bus.send_all(ByteKind::Data, &[0x01, 0x80, 0x5A]).unwrap();

        assert_eq!(
            wire.decode(),
            vec![
                (ByteKind::Data, 0x01),
                (ByteKind::Data, 0x80),
                (ByteKind::Data, 0x5A)
            ]
        );
        let selects = wire
            .events()
            .iter()
            .filter(|e| **e == Event::Pin(Line::ChipEnable, false))
            .count();
        assert_eq!(selects, 1);
    }

    #[test]
    fn test_empty_run_touches_nothing() {
        let wire = Wire::new();
        let mut bus = transport(&wire);

        bus.send_all(ByteKind::Data, &[]).unwrap();
        assert!(wire.events().is_empty());
    }

    #[test]
    fn test_clock_timing() {
        let wire = Wire::new();
        let mut bus = transport(&wire).with_half_period_ns(500);

        bus.send(ByteKind::Command, 0x00).unwrap();
        assert_eq!(wire.delayed_ns(), 8 * 2 * 500);

        // Never faster than the datasheet allows
        let wire = Wire::new();
        let mut bus = transport(&wire).with_half_period_ns(10);
        bus.send(ByteKind::Command, 0x00).unwrap();
        assert_eq!(wire.delayed_ns(), 8 * 2 * HALF_PERIOD_NS as u64);
    }

    #[test]
    fn test_pin_failure_releases_chip_enable() {
        let wire = Wire::new();
        let mut bus = BitBangTransport::new(
            wire.pin(Line::Clock),
            wire.broken_pin(Line::Data),
            wire.pin(Line::DataCommand),
            wire.pin(Line::ChipEnable),
            wire.delay(),
        );

        assert_eq!(
            bus.send(ByteKind::Data, 0x01),
            Err(BusError::Pin(Line::Data))
        );
        assert_eq!(
            wire.events().last(),
            Some(&Event::Pin(Line::ChipEnable, true))
        );
    }

    #[test]
    fn test_controller_over_bitbang() {
        let wire = Wire::new();
        let mut lcd = Pcd8544::new(transport(&wire), MockReset::new());

        lcd.begin(84, 48, ChipVariant::Pcd8544).unwrap();
        lcd.set_contrast(60).unwrap();

        let bytes = wire.decode();
        let commands: Vec<u8> = bytes
            .iter()
            .filter(|(kind, _)| kind.is_command())
            .map(|&(_, b)| b)
            .collect();
        let data = bytes.iter().filter(|(kind, _)| !kind.is_command()).count();

        assert_eq!(&commands[..5], &[0x21, 0x13, 0xC2, 0x20, 0x09]);
        assert_eq!(&commands[commands.len() - 3..], &[0x21, 0xBC, 0x20]);
        assert_eq!(data, 504);
    }
}
