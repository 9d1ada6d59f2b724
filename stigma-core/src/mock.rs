//! Emulated panel for host tests
//!
//! [`MockPanel`] is a [`Transport`] that records every byte and decodes it
//! the way the controller would: instruction set, power-down, addressing
//! mode, Vop, bias and display mode are tracked, and data bytes land in an
//! emulated display RAM with address auto-increment. Tests can then assert
//! on what the panel would show instead of on raw byte streams.

#![cfg(any(test, feature = "mock"))]

use core::convert::Infallible;

use heapless::Vec;
use stigma_hal::{ByteKind, ResetLine, Transport};

use crate::config::ChipVariant;
use crate::protocol::DisplayMode;

/// Columns of the largest supported RAM
pub const MAX_COLUMNS: usize = 102;

/// Bands of the largest supported RAM
pub const MAX_BANDS: usize = 9;

/// Bytes kept in the transfer log
pub const LOG_CAPACITY: usize = 4096;

/// Recorded transfer log
pub type Log = Vec<(ByteKind, u8), LOG_CAPACITY>;

/// Emulated PCD8544-family controller
pub struct MockPanel {
    columns: u8,
    bands: u8,
    ram: [[u8; MAX_COLUMNS]; MAX_BANDS],
    x: u8,
    y: u8,
    extended: bool,
    power_down: bool,
    vertical: bool,
    mode: DisplayMode,
    vop: Option<u8>,
    bias: Option<u8>,
    temperature: Option<u8>,
    partial: bool,
    log: Log,
    dropped: usize,
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::for_variant(ChipVariant::Pcd8544)
    }
}

impl MockPanel {
    /// PCD8544-sized panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel with the variant's RAM size
    pub fn for_variant(variant: ChipVariant) -> Self {
        let dialect = variant.dialect();
        Self {
            columns: dialect.ram_columns,
            bands: dialect.ram_bands,
            // Power-on RAM contents are undefined; start dirty so clears show
            ram: [[0xA5; MAX_COLUMNS]; MAX_BANDS],
            x: 0,
            y: 0,
            extended: false,
            power_down: true,
            vertical: false,
            mode: DisplayMode::Blank,
            vop: None,
            bias: None,
            temperature: None,
            partial: false,
            log: Vec::new(),
            dropped: 0,
        }
    }

    /// RAM byte at `(column, band)`
    pub fn ram(&self, column: u8, band: u8) -> u8 {
        self.ram[band as usize][column as usize]
    }

    /// One band of RAM, `width` columns from the left
    pub fn band(&self, band: u8, width: u8) -> &[u8] {
        &self.ram[band as usize][..width as usize]
    }

    /// Check whether the top-left `width` x `bands` area is all zero
    pub fn is_blank(&self, width: u8, bands: u8) -> bool {
        (0..bands).all(|band| self.band(band, width).iter().all(|&b| b == 0))
    }

    /// Current RAM address as `(x, y)`
    pub fn address(&self) -> (u8, u8) {
        (self.x, self.y)
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn vop(&self) -> Option<u8> {
        self.vop
    }

    pub fn bias(&self) -> Option<u8> {
        self.bias
    }

    pub fn temperature_coefficient(&self) -> Option<u8> {
        self.temperature
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn is_powered_down(&self) -> bool {
        self.power_down
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Every recorded transfer in order
    pub fn log(&self) -> &[(ByteKind, u8)] {
        &self.log
    }

    /// Bytes that did not fit in the log
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Recorded command bytes
    pub fn commands(&self) -> Vec<u8, LOG_CAPACITY> {
        self.bytes_of(ByteKind::Command)
    }

    /// Recorded data bytes
    pub fn data(&self) -> Vec<u8, LOG_CAPACITY> {
        self.bytes_of(ByteKind::Data)
    }

    /// Forget recorded transfers, keeping RAM and registers
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.dropped = 0;
    }

    fn bytes_of(&self, kind: ByteKind) -> Vec<u8, LOG_CAPACITY> {
        self.log
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|&(_, byte)| byte)
            .collect()
    }

    fn execute(&mut self, byte: u8) {
        if byte & 0xF8 == 0x20 {
            self.power_down = byte & 0x04 != 0;
            self.vertical = byte & 0x02 != 0;
            self.extended = byte & 0x01 != 0;
        } else if self.extended {
            if byte & 0x80 != 0 {
                self.vop = Some(byte & 0x7F);
            } else if byte & 0xF8 == 0x10 {
                self.bias = Some(byte & 0x07);
            } else if byte == 0x05 {
                self.partial = true;
            } else if byte & 0xFC == 0x04 {
                self.temperature = Some(byte & 0x03);
            }
        } else if byte & 0x80 != 0 {
            self.x = byte & 0x7F;
        } else if byte & 0xC0 == 0x40 {
            self.y = byte & 0x0F;
        } else if byte & 0xF8 == 0x08 {
            self.mode = DisplayMode::from_bits(byte);
        }
    }

    fn store(&mut self, byte: u8) {
        if self.x < self.columns && self.y < self.bands {
            self.ram[self.y as usize][self.x as usize] = byte;
        }

        if self.vertical {
            self.y += 1;
            if self.y >= self.bands {
                self.y = 0;
                self.x = (self.x + 1) % self.columns;
            }
        } else {
            self.x += 1;
            if self.x >= self.columns {
                self.x = 0;
                self.y = (self.y + 1) % self.bands;
            }
        }
    }
}

impl Transport for MockPanel {
    type Error = Infallible;

    fn send(&mut self, kind: ByteKind, byte: u8) -> Result<(), Self::Error> {
        if self.log.push((kind, byte)).is_err() {
            self.dropped += 1;
        }

        match kind {
            ByteKind::Command => self.execute(byte),
            ByteKind::Data => self.store(byte),
        }
        Ok(())
    }
}

/// Reset line that counts pulses
#[derive(Debug, Default)]
pub struct MockReset {
    pulses: u32,
}

impl MockReset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulses(&self) -> u32 {
        self.pulses
    }
}

impl ResetLine for MockReset {
    type Error = Infallible;

    fn pulse(&mut self) -> Result<(), Self::Error> {
        self.pulses += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_auto_increment_wraps() {
        let mut panel = MockPanel::new();
        panel.send(ByteKind::Command, 0x80 | 83).unwrap();
        panel.send(ByteKind::Command, 0x40 | 5).unwrap();
        panel.send_all(ByteKind::Data, &[0x11, 0x22]).unwrap();

        assert_eq!(panel.ram(83, 5), 0x11);
        assert_eq!(panel.ram(0, 0), 0x22);
        assert_eq!(panel.address(), (1, 0));
    }

    #[test]
    fn test_extended_commands_do_not_move_address() {
        let mut panel = MockPanel::new();
        panel
            .send_all(ByteKind::Command, &[0x21, 0x13, 0xC2, 0x20, 0x0C])
            .unwrap();

        assert_eq!(panel.bias(), Some(3));
        assert_eq!(panel.vop(), Some(0x42));
        assert_eq!(panel.address(), (0, 0));
        assert_eq!(panel.mode(), DisplayMode::Normal);
        assert!(!panel.is_powered_down());
        assert!(!panel.is_extended());
    }

    #[test]
    fn test_log_split_by_kind() {
        let mut panel = MockPanel::new();
        panel.send(ByteKind::Command, 0x80).unwrap();
        panel.send(ByteKind::Data, 0xAA).unwrap();

        assert_eq!(panel.commands().as_slice(), &[0x80]);
        assert_eq!(panel.data().as_slice(), &[0xAA]);

        panel.clear_log();
        assert!(panel.log().is_empty());
        assert_eq!(panel.ram(0, 0), 0xAA);
    }

    #[test]
    fn test_st7576_ram_size() {
        let mut panel = MockPanel::for_variant(ChipVariant::St7576);
        panel.send(ByteKind::Command, 0x80 | 101).unwrap();
        panel.send(ByteKind::Command, 0x40 | 8).unwrap();
        panel.send(ByteKind::Data, 0x01).unwrap();

        assert_eq!(panel.ram(101, 8), 0x01);
        assert_eq!(panel.address(), (0, 0));
    }

    #[test]
    fn test_reset_counts() {
        let mut reset = MockReset::new();
        reset.pulse().unwrap();
        reset.pulse().unwrap();
        assert_eq!(reset.pulses(), 2);
    }
}
