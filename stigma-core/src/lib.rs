//! Board-agnostic driver logic for PCD8544-family LCDs
//!
//! This crate contains everything that does not depend on a particular
//! microcontroller:
//!
//! - Instruction encodings and per-variant command tables (PCD8544, ST7576)
//! - Panel configuration and geometry validation
//! - The built-in 5x8 font and user glyph table
//! - Bar chart column masks
//! - Cursor, power and inversion state transitions
//! - The [`Pcd8544`] controller, generic over a [`Transport`] and [`ResetLine`]
//!
//! Pin-level transports live in `stigma-drivers`.
//!
//! ```ignore
//! let mut lcd = Pcd8544::new(transport, reset);
//! lcd.begin(84, 48, ChipVariant::Pcd8544)?;
//! lcd.set_cursor(0, 1)?;
//! lcd.print("Hello")?;
//! for value in samples {
//!     lcd.draw_column(2, value)?;
//! }
//! ```
//!
//! [`Transport`]: stigma_hal::Transport
//! [`ResetLine`]: stigma_hal::ResetLine

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod chart;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod glyph;
pub mod mock;
pub mod protocol;
pub mod state;

pub use config::{ChipVariant, ConfigError, DeviceConfig, Geometry};
pub use display::Pcd8544;
pub use error::Error;
pub use glyph::{Glyph, GlyphTable};
pub use protocol::{DisplayMode, Instruction};
pub use state::{Cursor, DeviceState};
