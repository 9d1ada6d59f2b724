//! Display controller
//!
//! [`Pcd8544`] owns a [`Transport`] and a [`ResetLine`] and drives a
//! PCD8544-family panel through them. It keeps a text cursor (pixel column,
//! row band), power and inversion flags, the last contrast level and a
//! table of user glyphs; every operation sends the instructions produced by
//! the matching [`DeviceState`] transition and then commits the new state.
//!
//! The controller never reads the display back. Drawing writes straight to
//! the panel RAM at the cursor, so there is no framebuffer to flush.

use core::fmt;

use stigma_hal::{ByteKind, ResetLine, Transport};

use crate::chart;
use crate::config::{ChipVariant, DeviceConfig, Geometry};
use crate::error::Error;
use crate::glyph::{self, Glyph, GlyphTable, CELL_WIDTH};
use crate::protocol::{DisplayMode, Instruction, MAX_CONTRAST};
use crate::state::{Cursor, DeviceState, Transition};

/// Bytes sent per transfer when filling RAM
const FILL_CHUNK: usize = 16;

/// Driver for one PCD8544/ST7576 panel
pub struct Pcd8544<'g, T, R> {
    transport: T,
    reset: R,
    config: DeviceConfig,
    geometry: Geometry,
    state: DeviceState,
    glyphs: GlyphTable<'g>,
}

impl<'g, T, R> Pcd8544<'g, T, R> {
    /// Wrap a transport and reset line
    ///
    /// Nothing is sent until [`begin`](Self::begin).
    pub fn new(transport: T, reset: R) -> Self {
        let config = DeviceConfig::default();
        Self {
            transport,
            reset,
            config,
            geometry: Geometry::default(),
            state: DeviceState::initial(config.variant.dialect().default_vop),
            glyphs: GlyphTable::new(),
        }
    }

    /// Configuration of the last successful initialisation
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn variant(&self) -> ChipVariant {
        self.config.variant
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }

    /// Last requested contrast level
    pub fn contrast(&self) -> u8 {
        self.state.contrast
    }

    pub fn is_powered(&self) -> bool {
        self.state.powered
    }

    pub fn is_inverse(&self) -> bool {
        self.state.inverse
    }

    pub fn is_inverse_output(&self) -> bool {
        self.state.inverse_output
    }

    /// Registered user glyphs
    pub fn glyphs(&self) -> &GlyphTable<'g> {
        &self.glyphs
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give back the transport and reset line
    pub fn release(self) -> (T, R) {
        (self.transport, self.reset)
    }
}

impl<'g, T: Transport, R: ResetLine> Pcd8544<'g, T, R> {
    /// Reset and initialise a `width` x `height` panel
    pub fn begin(
        &mut self,
        width: u8,
        height: u8,
        variant: ChipVariant,
    ) -> Result<(), Error<T::Error>> {
        self.begin_with(&DeviceConfig::new(width, height, variant))
    }

    /// Reset and initialise from a configuration
    ///
    /// Pulses reset, programs bias and operating voltage, clears the RAM,
    /// turns the display on in normal mode and homes the cursor. Power,
    /// inversion and contrast state start over; registered glyphs are kept.
    /// Nothing is sent if the configuration is invalid.
    pub fn begin_with(&mut self, config: &DeviceConfig) -> Result<(), Error<T::Error>> {
        let geometry = config.validate()?;
        let dialect = config.variant.dialect();
        let contrast = config
            .contrast
            .unwrap_or(dialect.default_vop)
            .min(MAX_CONTRAST);

        self.reset.pulse().map_err(|_| Error::Reset)?;

        self.config = *config;
        self.geometry = geometry;
        self.state = DeviceState::initial(contrast);

        for instruction in dialect.power_up(contrast) {
            self.command(instruction)?;
        }

        self.clear()?;

        self.command(Instruction::DisplayControl(DisplayMode::Blank))?;
        self.command(Instruction::DisplayControl(DisplayMode::Normal))?;

        let origin = self.state.locate(geometry, 0, 0);
        self.apply(origin)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{=str} ready: {}x{} px, Vop {}",
            dialect.name,
            geometry.width(),
            geometry.height(),
            dialect.safe_vop(contrast)
        );

        Ok(())
    }
}

impl<'g, T: Transport, R> Pcd8544<'g, T, R> {
    /// Power the panel down
    ///
    /// RAM, configuration, cursor and glyphs are kept, so
    /// [`set_power(true)`](Self::set_power) brings the same picture back.
    pub fn stop(&mut self) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str} powering down", self.config.variant.dialect().name);

        self.set_power(false)
    }

    /// Blank the whole RAM and home the cursor to (0, 0)
    ///
    /// Each band is addressed on its own, so panels narrower than the
    /// controller RAM are cleared completely too.
    pub fn clear(&mut self) -> Result<(), Error<T::Error>> {
        for band in 0..self.geometry.bands() {
            self.address(Cursor::new(0, band))?;
            self.fill(self.geometry.width() as usize, 0x00)?;
        }

        let origin = self.state.locate(self.geometry, 0, 0);
        self.apply(origin)
    }

    /// Blank the current line and move the cursor to its start
    pub fn clear_line(&mut self) -> Result<(), Error<T::Error>> {
        let line = self.state.cursor.line;
        self.address(Cursor::new(0, line))?;

        self.fill(self.geometry.width() as usize, 0x00)?;

        let start = self.state.locate(self.geometry, 0, line);
        self.apply(start)
    }

    /// Move the cursor to column 0 of the current line
    pub fn home(&mut self) -> Result<(), Error<T::Error>> {
        let line = self.state.cursor.line;
        let home = self.state.locate(self.geometry, 0, line);
        self.apply(home)
    }

    /// Move the cursor, clamping into the panel
    pub fn set_cursor(&mut self, column: u8, line: u8) -> Result<(), Error<T::Error>> {
        let located = self.state.locate(self.geometry, column, line);
        self.apply(located)
    }

    /// Move the cursor, rejecting positions outside the panel
    pub fn try_set_cursor(&mut self, column: u8, line: u8) -> Result<(), Error<T::Error>> {
        if !self.geometry.contains(column, line) {
            return Err(Error::CursorOutOfRange { column, line });
        }
        self.set_cursor(column, line)
    }

    /// Draw one character cell at the cursor
    ///
    /// Returns the number of characters drawn: 1, or 0 for codes above 127
    /// (nothing is sent and the cursor stays put).
    pub fn write(&mut self, code: u8) -> Result<usize, Error<T::Error>> {
        let Some(glyph) = glyph::resolve(code, &self.glyphs) else {
            return Ok(0);
        };

        let mask = self.state.output_mask();
        let mut cell = [mask; CELL_WIDTH];
        for (out, column) in cell.iter_mut().zip(glyph.iter()) {
            *out = column ^ mask;
        }
        self.data(&cell)?;

        let advanced = self.state.advance(self.geometry, CELL_WIDTH as u16);
        self.apply(advanced)?;
        Ok(1)
    }

    /// Draw each byte of `text`, returning how many were drawable
    pub fn print(&mut self, text: &str) -> Result<usize, Error<T::Error>> {
        let mut drawn = 0;
        for code in text.bytes() {
            drawn += self.write(code)?;
        }
        Ok(drawn)
    }

    /// Register the glyph drawn for `code` (0-31)
    ///
    /// The bitmap is borrowed; later [`write`](Self::write) calls read it.
    pub fn create_char(&mut self, code: u8, glyph: &'g Glyph) -> Result<(), Error<T::Error>> {
        self.glyphs.set(code, glyph)?;
        Ok(())
    }

    /// Draw a `columns` x `lines` bitmap with its top-left at the cursor
    ///
    /// `data` holds `lines` rows of `columns` bytes, each byte one 8-pixel
    /// column with bit 0 at the top. Lines past the bottom of the panel
    /// wrap to the top; columns past the right edge run on into the next
    /// band, as the RAM address would. Bytes are sent as given, without
    /// output inversion. The cursor then advances by `columns`.
    pub fn draw_bitmap(
        &mut self,
        data: &[u8],
        columns: u8,
        lines: u8,
    ) -> Result<(), Error<T::Error>> {
        let expected = columns as usize * lines as usize;
        if data.len() < expected {
            return Err(Error::BitmapSize {
                expected,
                actual: data.len(),
            });
        }

        if columns > 0 {
            let start = self.state.cursor;
            for (offset, row) in data[..expected].chunks_exact(columns as usize).enumerate() {
                self.address(self.band_below(start, offset))?;
                self.data(row)?;
            }
        }

        let skipped = self.state.skip(self.geometry, columns as u16);
        self.apply(skipped)
    }

    /// Draw one bar chart column at the cursor
    ///
    /// The bar is `lines` bands tall with its top at the cursor line and is
    /// filled `value` pixels from the bottom (clamped to `lines * 8`). The
    /// cursor then advances by one column.
    pub fn draw_column(&mut self, lines: u8, value: u8) -> Result<(), Error<T::Error>> {
        let start = self.state.cursor;
        let mask = self.state.output_mask();

        for (band, bits) in chart::column_masks(lines, value).enumerate() {
            self.address(self.band_below(start, band))?;
            self.data(&[bits ^ mask])?;
        }

        let skipped = self.state.skip(self.geometry, 1);
        self.apply(skipped)
    }

    /// Leave (`true`) or enter (`false`) power-down
    pub fn set_power(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        let power = self.state.power(on);
        self.apply(power)
    }

    /// Same as `set_power(true)`
    pub fn display(&mut self) -> Result<(), Error<T::Error>> {
        self.set_power(true)
    }

    /// Same as `set_power(false)`
    pub fn no_display(&mut self) -> Result<(), Error<T::Error>> {
        self.set_power(false)
    }

    /// Switch the whole panel between normal and inverse video
    pub fn set_inverse(&mut self, enabled: bool) -> Result<(), Error<T::Error>> {
        let inverted = self.state.invert(enabled);
        self.apply(inverted)
    }

    /// Flip the bits of text and bar charts drawn from now on
    ///
    /// Bitmaps and already drawn content are unaffected.
    pub fn set_inverse_output(&mut self, enabled: bool) {
        self.state = self.state.invert_output(enabled).state;
    }

    /// Set the contrast (operating voltage), 0-127
    ///
    /// Levels above 127 are capped. The voltage actually programmed is
    /// limited to the variant's safe range; [`contrast`](Self::contrast)
    /// reports the requested level.
    pub fn set_contrast(&mut self, level: u8) -> Result<(), Error<T::Error>> {
        let dialect = self.config.variant.dialect();

        #[cfg(feature = "defmt")]
        if dialect.safe_vop(level) != level.min(MAX_CONTRAST) {
            defmt::warn!(
                "contrast {} outside {=str} range, sending Vop {}",
                level,
                dialect.name,
                dialect.safe_vop(level)
            );
        }

        let contrast = self.state.contrast(dialect, level);
        self.apply(contrast)
    }

    /// Cell `offset` bands below `start`, wrapping past the last band
    fn band_below(&self, start: Cursor, offset: usize) -> Cursor {
        let bands = self.geometry.bands() as usize;
        Cursor::new(start.column, ((start.line as usize + offset) % bands) as u8)
    }

    fn apply(&mut self, transition: Transition) -> Result<(), Error<T::Error>> {
        for &instruction in transition.commands.iter() {
            self.command(instruction)?;
        }
        self.state = transition.state;
        Ok(())
    }

    fn address(&mut self, cursor: Cursor) -> Result<(), Error<T::Error>> {
        for instruction in cursor.address() {
            self.command(instruction)?;
        }
        Ok(())
    }

    fn fill(&mut self, count: usize, byte: u8) -> Result<(), Error<T::Error>> {
        let chunk = [byte; FILL_CHUNK];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.data(&chunk[..n])?;
            remaining -= n;
        }
        Ok(())
    }

    fn command(&mut self, instruction: Instruction) -> Result<(), Error<T::Error>> {
        self.transport
            .send(ByteKind::Command, instruction.encode())
            .map_err(Error::Bus)
    }

    fn data(&mut self, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        self.transport
            .send_all(ByteKind::Data, bytes)
            .map_err(Error::Bus)
    }
}

/// Text formatting straight onto the panel
///
/// Codes above 127 (any non-ASCII UTF-8 byte) are skipped.
impl<T: Transport, R> fmt::Write for Pcd8544<'_, T, R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}
