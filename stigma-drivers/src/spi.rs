//! Hardware SPI transport
//!
//! The [`SpiDevice`] owns chip-enable and asserts it around every write;
//! this transport only adds the D/C line. Configure the bus from
//! [`stigma_hal::SpiConfig`]: mode 0, at most 4 MHz.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::spi::SpiDevice;
use stigma_hal::{ByteKind, Transport};

use crate::error::{BusError, Line};

/// Transport over an SPI device and a D/C output
pub struct SpiTransport<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiTransport<SPI, DC> {
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Give back the SPI device and D/C pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> Transport for SpiTransport<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    type Error = BusError;

    fn send(&mut self, kind: ByteKind, byte: u8) -> Result<(), Self::Error> {
        self.send_all(kind, &[byte])
    }

    /// One SPI write for the whole run
    fn send_all(&mut self, kind: ByteKind, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.is_empty() {
            return Ok(());
        }

        self.dc
            .set_state(PinState::from(kind.dc_level()))
            .map_err(|_| BusError::Pin(Line::DataCommand))?;
        self.spi.write(bytes).map_err(|_| BusError::Spi)
    }
}
