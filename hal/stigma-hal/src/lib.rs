//! Stigma Hardware Abstraction Layer
//!
//! This crate defines the capabilities the display controller needs from
//! the platform. The controller in `stigma-core` never touches pins or
//! peripherals directly; it is handed something that can push tagged bytes
//! to the panel and something that can pulse its reset line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (stigma-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stigma-core (controller, protocol)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stigma-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   bit-banged  │       │ hardware SPI  │
//! │  GPIO (drv)   │       │ device (drv)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::Transport`] - Command/data byte transmission
//! - [`reset::ResetLine`] - Timed reset pulse
//!
//! [`spi::SpiConfig`] describes the serial timing the controller accepts,
//! for platforms that drive it from an SPI peripheral.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod reset;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use bus::{ByteKind, Transport};
pub use reset::ResetLine;
pub use spi::SpiConfig;
