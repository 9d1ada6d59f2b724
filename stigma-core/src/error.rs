//! Controller errors

use core::fmt;

use crate::config::ConfigError;
use crate::glyph::CodeOutOfRange;

/// Error returned by display operations
///
/// `E` is the transport's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Transfer on the serial bus failed
    Bus(E),
    /// Reset line could not be driven
    Reset,
    /// Panel dimensions rejected
    Config(ConfigError),
    /// Cursor position outside the panel (strict positioning only)
    CursorOutOfRange { column: u8, line: u8 },
    /// Custom glyph code outside 0-31
    GlyphCode(u8),
    /// Bitmap shorter than `columns * lines` bytes
    BitmapSize { expected: usize, actual: usize },
}

impl<E> From<ConfigError> for Error<E> {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl<E> From<CodeOutOfRange> for Error<E> {
    fn from(err: CodeOutOfRange) -> Self {
        Error::GlyphCode(err.0)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::Reset => write!(f, "reset line error"),
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::CursorOutOfRange { column, line } => {
                write!(f, "cursor ({}, {}) outside the panel", column, line)
            }
            Error::GlyphCode(code) => write!(f, "glyph code {} is not user-definable", code),
            Error::BitmapSize { expected, actual } => {
                write!(f, "bitmap needs {} bytes, got {}", expected, actual)
            }
        }
    }
}
