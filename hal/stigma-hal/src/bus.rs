//! Command/data bus abstraction
//!
//! The controller distinguishes two kinds of bytes on the same serial
//! line: commands (D/C low) and display RAM data (D/C high). A transport
//! asserts chip-enable, sets D/C for the byte kind, clocks the byte out
//! most-significant bit first and releases chip-enable again.

/// How the controller should interpret a transmitted byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteKind {
    /// Instruction byte (D/C low)
    Command,
    /// Display RAM byte: one 8-pixel column of a row band (D/C high)
    Data,
}

impl ByteKind {
    /// Check if this is a command byte
    pub fn is_command(self) -> bool {
        matches!(self, ByteKind::Command)
    }

    /// Logic level of the D/C line for this byte kind (true = high)
    pub fn dc_level(self) -> bool {
        matches!(self, ByteKind::Data)
    }
}

/// Byte transport to the display controller
///
/// Every call must leave chip-enable deasserted, so bytes of different
/// kinds can be freely interleaved by the caller.
pub trait Transport {
    /// Error type for bus operations
    type Error;

    /// Send a single byte of the given kind
    fn send(&mut self, kind: ByteKind, byte: u8) -> Result<(), Self::Error>;

    /// Send a run of bytes of the same kind
    ///
    /// The default implementation sends byte by byte. Transports backed by
    /// a hardware peripheral should override this to batch the transfer.
    fn send_all(&mut self, kind: ByteKind, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.send(kind, byte)?;
        }
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, kind: ByteKind, byte: u8) -> Result<(), Self::Error> {
        (**self).send(kind, byte)
    }

    fn send_all(&mut self, kind: ByteKind, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).send_all(kind, bytes)
    }
}
