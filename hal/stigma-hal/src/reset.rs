//! Reset line abstraction

/// Hardware reset of the display controller
///
/// The PCD8544 needs RST held low for a minimum pulse width after power
/// is applied, otherwise its internal registers are undefined.
pub trait ResetLine {
    /// Error type for reset operations
    type Error;

    /// Drive the reset line low for the required pulse width, then release it
    fn pulse(&mut self) -> Result<(), Self::Error>;
}

impl<R: ResetLine + ?Sized> ResetLine for &mut R {
    type Error = R::Error;

    fn pulse(&mut self) -> Result<(), Self::Error> {
        (**self).pulse()
    }
}
