//! Driver errors

use core::fmt;

/// Signal of the panel's serial interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Serial clock (SCLK)
    Clock,
    /// Serial data in (SDIN)
    Data,
    /// Data/command select (D/C)
    DataCommand,
    /// Chip enable, active low (SCE)
    ChipEnable,
    /// Reset, active low (RST)
    Reset,
}

/// Pin or SPI failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// A GPIO output could not be driven
    Pin(Line),
    /// The SPI device reported an error
    Spi,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Pin(line) => write!(f, "failed to drive {:?} line", line),
            BusError::Spi => write!(f, "SPI transfer failed"),
        }
    }
}
