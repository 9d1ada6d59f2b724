//! Bar chart column geometry
//!
//! A bar spans `lines` row bands and is filled from the bottom up. Within a
//! band the bottom pixel is bit 7, so a band holding `n` filled pixels is
//! `0xFF << (8 - n)`.

use crate::config::BAND_HEIGHT;

/// Pixel height of a bar spanning `lines` bands
pub fn bar_height(lines: u8) -> u16 {
    lines as u16 * BAND_HEIGHT as u16
}

/// Fill mask of one band, `band` counted from the top of the bar
///
/// `value` is clamped to the bar height.
pub fn band_mask(lines: u8, value: u8, band: u8) -> u8 {
    if band >= lines {
        return 0;
    }

    let value = (value as u16).min(bar_height(lines));
    let below = (lines - 1 - band) as u16 * BAND_HEIGHT as u16;
    let filled = value.saturating_sub(below).min(BAND_HEIGHT as u16);

    if filled == 0 {
        0x00
    } else {
        0xFF << (BAND_HEIGHT as u16 - filled)
    }
}

/// Band masks from the top of the bar down
pub fn column_masks(lines: u8, value: u8) -> impl Iterator<Item = u8> {
    (0..lines).map(move |band| band_mask(lines, value, band))
}
