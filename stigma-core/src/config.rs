//! Panel configuration
//!
//! Width, height and controller variant of the attached panel. A
//! configuration is checked against the variant's display RAM before the
//! controller touches the hardware, so every later cursor and band
//! computation can rely on a [`Geometry`] that fits the chip.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::protocol::{self, Dialect};

/// Height of one row band (page) in pixels
pub const BAND_HEIGHT: u8 = 8;

/// Controller dialect
///
/// The supported chips share the PCD8544 instruction set but differ in
/// RAM size, operating-voltage range and a few init-time instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChipVariant {
    /// Philips PCD8544 (Nokia 5110/3310 modules)
    #[default]
    Pcd8544,
    /// Sitronix ST7576
    St7576,
}

impl ChipVariant {
    /// Command table for this variant
    pub fn dialect(self) -> &'static Dialect {
        match self {
            ChipVariant::Pcd8544 => &protocol::PCD8544,
            ChipVariant::St7576 => &protocol::ST7576,
        }
    }
}

impl fmt::Display for ChipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dialect().name)
    }
}

/// Rejected panel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width of zero pixels
    ZeroWidth,
    /// Height smaller than one row band
    ZeroHeight,
    /// Height is not a multiple of the 8-pixel row band
    UnalignedHeight(u8),
    /// Wider than the variant's display RAM
    TooWide { width: u8, max: u8 },
    /// More row bands than the variant's display RAM
    TooTall { height: u8, max: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWidth => write!(f, "width must be at least one column"),
            ConfigError::ZeroHeight => write!(f, "height must be at least one row band"),
            ConfigError::UnalignedHeight(h) => {
                write!(f, "height {} is not a multiple of {}", h, BAND_HEIGHT)
            }
            ConfigError::TooWide { width, max } => {
                write!(f, "width {} exceeds controller RAM ({} columns)", width, max)
            }
            ConfigError::TooTall { height, max } => {
                write!(f, "height {} exceeds controller RAM ({} pixels)", height, max)
            }
        }
    }
}

/// Validated panel dimensions
///
/// Only obtainable through [`Geometry::new`] (or the 84x48 default), so
/// `width >= 1` and `height` is a non-zero multiple of [`BAND_HEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    width: u8,
    height: u8,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: 84,
            height: 48,
        }
    }
}

impl Geometry {
    /// Check dimensions against the variant's display RAM
    pub fn new(width: u8, height: u8, variant: ChipVariant) -> Result<Self, ConfigError> {
        let dialect = variant.dialect();

        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height < BAND_HEIGHT {
            return Err(ConfigError::ZeroHeight);
        }
        if height % BAND_HEIGHT != 0 {
            return Err(ConfigError::UnalignedHeight(height));
        }
        if width > dialect.ram_columns {
            return Err(ConfigError::TooWide {
                width,
                max: dialect.ram_columns,
            });
        }
        if height / BAND_HEIGHT > dialect.ram_bands {
            return Err(ConfigError::TooTall {
                height,
                max: dialect.ram_bands * BAND_HEIGHT,
            });
        }

        Ok(Self { width, height })
    }

    /// Width in pixels (columns)
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Number of row bands
    pub const fn bands(&self) -> u8 {
        self.height / BAND_HEIGHT
    }

    /// Bytes needed to cover every band at full width
    pub fn ram_bytes(&self) -> usize {
        self.width as usize * self.bands() as usize
    }

    /// Clamp a column into `[0, width)`
    pub fn clamp_column(&self, column: u8) -> u8 {
        column.min(self.width - 1)
    }

    /// Clamp a line into `[0, bands)`
    pub fn clamp_line(&self, line: u8) -> u8 {
        line.min(self.bands() - 1)
    }

    /// Check whether `(column, line)` addresses an existing cell
    pub fn contains(&self, column: u8, line: u8) -> bool {
        column < self.width && line < self.bands()
    }
}

/// Panel configuration
///
/// The serialized form uses lowercase variant names:
///
/// ```toml
/// variant = "pcd8544"
/// width = 84
/// height = 48
/// contrast = 56
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Controller dialect
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: ChipVariant,
    /// Width in pixels
    pub width: u8,
    /// Height in pixels (multiple of 8)
    pub height: u8,
    /// Initial contrast (0-127), the variant default when unset
    #[cfg_attr(feature = "serde", serde(default))]
    pub contrast: Option<u8>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(84, 48, ChipVariant::Pcd8544)
    }
}

impl DeviceConfig {
    /// Configuration with the variant's default contrast
    pub const fn new(width: u8, height: u8, variant: ChipVariant) -> Self {
        Self {
            variant,
            width,
            height,
            contrast: None,
        }
    }

    /// Override the initial contrast
    pub const fn with_contrast(mut self, level: u8) -> Self {
        self.contrast = Some(level);
        self
    }

    /// Validate the dimensions against the variant
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.width, self.height, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nokia_5110() {
        let config = DeviceConfig::default();
        let geometry = config.validate().unwrap();

        assert_eq!(config.variant, ChipVariant::Pcd8544);
        assert_eq!(geometry, Geometry::default());
        assert_eq!(geometry.bands(), 6);
        assert_eq!(geometry.ram_bytes(), 504);
    }

    #[test]
    fn test_rejects_unaligned_height() {
        assert_eq!(
            Geometry::new(84, 44, ChipVariant::Pcd8544),
            Err(ConfigError::UnalignedHeight(44))
        );
        assert_eq!(
            Geometry::new(84, 4, ChipVariant::Pcd8544),
            Err(ConfigError::ZeroHeight)
        );
        assert_eq!(
            Geometry::new(0, 48, ChipVariant::Pcd8544),
            Err(ConfigError::ZeroWidth)
        );
    }

    #[test]
    fn test_limits_follow_variant_ram() {
        assert_eq!(
            Geometry::new(96, 48, ChipVariant::Pcd8544),
            Err(ConfigError::TooWide { width: 96, max: 84 })
        );
        assert_eq!(
            Geometry::new(84, 56, ChipVariant::Pcd8544),
            Err(ConfigError::TooTall {
                height: 56,
                max: 48
            })
        );

        // The ST7576 has a larger RAM
        let geometry = Geometry::new(96, 64, ChipVariant::St7576).unwrap();
        assert_eq!(geometry.bands(), 8);
    }

    #[test]
    fn test_clamping() {
        let geometry = Geometry::default();
        assert_eq!(geometry.clamp_column(200), 83);
        assert_eq!(geometry.clamp_column(10), 10);
        assert_eq!(geometry.clamp_line(9), 5);
        assert!(geometry.contains(83, 5));
        assert!(!geometry.contains(84, 0));
        assert!(!geometry.contains(0, 6));
    }

    #[test]
    fn test_with_contrast() {
        let config = DeviceConfig::new(84, 48, ChipVariant::St7576).with_contrast(70);
        assert_eq!(config.contrast, Some(70));
        assert_eq!(config.variant, ChipVariant::St7576);
    }
}
