//! embedded-hal implementations of the stigma HAL traits
//!
//! This crate connects the controller in `stigma-core` to real pins:
//!
//! - [`BitBangTransport`]: four GPIO outputs clocked in software
//! - [`SpiTransport`]: an SPI device (which owns chip-enable) plus D/C
//! - [`PinReset`]: the RST line with a blocking delay

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bitbang;
pub mod error;
pub mod reset;
pub mod spi;

#[cfg(test)]
mod testing;

pub use bitbang::BitBangTransport;
pub use error::{BusError, Line};
pub use reset::PinReset;
pub use spi::SpiTransport;
