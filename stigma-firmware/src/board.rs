//! Panel wiring on the demo board
//!
//! | Signal | GPIO | SPI0 function |
//! |--------|------|---------------|
//! | D/C    | 16   |               |
//! | SCE    | 17   | CSn           |
//! | SCLK   | 18   | SCK           |
//! | SDIN   | 19   | TX            |
//! | RST    | 20   |               |

use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIN_16, PIN_17, PIN_18, PIN_19, PIN_20, SPI0};
use embassy_rp::Peri;
use embassy_time::Delay;
use stigma_drivers::PinReset;

#[cfg(not(feature = "bitbang"))]
use embassy_rp::spi::{self, Blocking, Spi};
#[cfg(not(feature = "bitbang"))]
use embedded_hal_bus::spi::ExclusiveDevice;
#[cfg(not(feature = "bitbang"))]
use stigma_drivers::SpiTransport;
#[cfg(not(feature = "bitbang"))]
use stigma_hal::spi::{Phase, Polarity, SpiConfig};

#[cfg(feature = "bitbang")]
use stigma_drivers::BitBangTransport;

/// Peripherals the panel is wired to
pub struct DisplayPins {
    pub spi: Peri<'static, SPI0>,
    pub dc: Peri<'static, PIN_16>,
    pub sce: Peri<'static, PIN_17>,
    pub sclk: Peri<'static, PIN_18>,
    pub sdin: Peri<'static, PIN_19>,
    pub rst: Peri<'static, PIN_20>,
}

#[cfg(not(feature = "bitbang"))]
pub type Transport = SpiTransport<
    ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, Delay>,
    Output<'static>,
>;

#[cfg(feature = "bitbang")]
pub type Transport = BitBangTransport<
    Output<'static>,
    Output<'static>,
    Output<'static>,
    Output<'static>,
    Delay,
>;

pub type Reset = PinReset<Output<'static>, Delay>;

/// Translate the panel's serial timing into an SPI0 configuration
#[cfg(not(feature = "bitbang"))]
fn spi_config(timing: SpiConfig) -> spi::Config {
    let mut config = spi::Config::default();
    config.frequency = timing.frequency;
    config.polarity = match timing.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match timing.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}

/// Build the transport and reset line for the panel
#[cfg(not(feature = "bitbang"))]
pub fn init(pins: DisplayPins, frequency_hz: u32) -> (Transport, Reset) {
    let timing = SpiConfig::with_frequency(frequency_hz);
    let spi = Spi::new_blocking_txonly(pins.spi, pins.sclk, pins.sdin, spi_config(timing));
    let sce = Output::new(pins.sce, Level::High);
    let device = ExclusiveDevice::new(spi, sce, Delay).expect("CS pin init failed");

    let dc = Output::new(pins.dc, Level::Low);
    let rst = Output::new(pins.rst, Level::High);

    (SpiTransport::new(device, dc), PinReset::new(rst, Delay))
}

/// Build the transport and reset line for the panel
#[cfg(feature = "bitbang")]
pub fn init(pins: DisplayPins, _frequency_hz: u32) -> (Transport, Reset) {
    let transport = BitBangTransport::new(
        Output::new(pins.sclk, Level::Low),
        Output::new(pins.sdin, Level::Low),
        Output::new(pins.dc, Level::Low),
        Output::new(pins.sce, Level::High),
        Delay,
    );
    let rst = Output::new(pins.rst, Level::High);

    (transport, PinReset::new(rst, Delay))
}
