//! Character cells and user-defined glyphs
//!
//! Text is drawn in 6-column cells: five glyph columns followed by one
//! spacing column. Codes 0-31 are reserved for caller-registered glyphs,
//! 32-127 come from the built-in [`FONT_5X8`](crate::font::FONT_5X8) and
//! anything above 127 is not drawable.

use crate::font;

/// Columns per glyph
pub const GLYPH_WIDTH: usize = 5;

/// Columns per character cell, including the spacing column
pub const CELL_WIDTH: usize = GLYPH_WIDTH + 1;

/// Number of user-definable codes (0-31)
pub const CUSTOM_GLYPHS: usize = 32;

/// Five column bytes, bit 0 at the top
pub type Glyph = [u8; GLYPH_WIDTH];

/// Drawn for a custom code that was never registered
pub const BLANK: Glyph = [0; GLYPH_WIDTH];

/// Code outside the user-definable range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CodeOutOfRange(pub u8);

/// Registered user glyphs
///
/// Holds borrows, not copies: the caller keeps each bitmap alive for as
/// long as the table can draw it.
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable<'g> {
    slots: [Option<&'g Glyph>; CUSTOM_GLYPHS],
}

impl Default for GlyphTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g> GlyphTable<'g> {
    /// Empty table
    pub const fn new() -> Self {
        Self {
            slots: [None; CUSTOM_GLYPHS],
        }
    }

    /// Register (or replace) the glyph for `code`
    pub fn set(&mut self, code: u8, glyph: &'g Glyph) -> Result<(), CodeOutOfRange> {
        let slot = self
            .slots
            .get_mut(code as usize)
            .ok_or(CodeOutOfRange(code))?;
        *slot = Some(glyph);
        Ok(())
    }

    /// Registered glyph for `code`, if any
    pub fn get(&self, code: u8) -> Option<&'g Glyph> {
        self.slots.get(code as usize).copied().flatten()
    }

    /// Number of registered codes
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Columns to draw for `code`
///
/// Unregistered custom codes render blank; codes above 127 have no glyph.
pub fn resolve(code: u8, custom: &GlyphTable<'_>) -> Option<Glyph> {
    if (code as usize) < CUSTOM_GLYPHS {
        Some(custom.get(code).copied().unwrap_or(BLANK))
    } else {
        font::glyph(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARROW: Glyph = [0x08, 0x1c, 0x3e, 0x7f, 0x00];

    #[test]
    fn test_register_and_lookup() {
        let mut table = GlyphTable::new();
        assert!(table.is_empty());

        table.set(1, &ARROW).unwrap();
        assert_eq!(table.get(1), Some(&ARROW));
        assert_eq!(table.get(2), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_code_out_of_range() {
        let mut table = GlyphTable::new();
        assert_eq!(table.set(32, &ARROW), Err(CodeOutOfRange(32)));
        assert_eq!(table.set(200, &ARROW), Err(CodeOutOfRange(200)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_replace_glyph() {
        let other: Glyph = [0x7f; 5];
        let mut table = GlyphTable::new();
        table.set(3, &ARROW).unwrap();
        table.set(3, &other).unwrap();
        assert_eq!(table.get(3), Some(&other));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_resolve() {
        let mut table = GlyphTable::new();
        table.set(0, &ARROW).unwrap();

        assert_eq!(resolve(0, &table), Some(ARROW));
        assert_eq!(resolve(5, &table), Some(BLANK));
        assert_eq!(resolve(b'1', &table), Some([0x00, 0x42, 0x7f, 0x40, 0x00]));
        assert_eq!(resolve(0x80, &table), None);
        assert_eq!(resolve(0xFF, &table), None);
    }
}
