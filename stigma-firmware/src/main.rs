//! Stigma - PCD8544 demo firmware
//!
//! Brings up the panel described in display.toml on an RP2040 board and
//! shows a title with a custom glyph, a live readout and a bar chart that
//! scrolls one column per tick.

#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use heapless::HistoryBuffer;
use {defmt_rtt as _, panic_probe as _};

use stigma_core::{Glyph, Pcd8544};

mod board;

mod config {
    use stigma_core::{ChipVariant, DeviceConfig};

    include!(concat!(env!("OUT_DIR"), "/display_config.rs"));
}

/// Bands used by the bar chart (bottom of the panel)
const CHART_LINES: u8 = 4;

/// Custom code for the wave glyph
const WAVE: u8 = 1;

static WAVE_GLYPH: Glyph = [0x0c, 0x02, 0x0c, 0x10, 0x0c];

/// Columns of chart history, enough for the widest supported panel
type History = HistoryBuffer<u8, 102>;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Stigma demo starting...");

    let p = embassy_rp::init(Default::default());

    let pins = board::DisplayPins {
        spi: p.SPI0,
        dc: p.PIN_16,
        sce: p.PIN_17,
        sclk: p.PIN_18,
        sdin: p.PIN_19,
        rst: p.PIN_20,
    };
    let (transport, reset) = board::init(pins, config::SPI_FREQUENCY_HZ);
    let mut lcd = Pcd8544::new(transport, reset);

    if let Err(e) = lcd.begin_with(&config::DISPLAY) {
        error!("Display init failed: {}", e);
        return;
    }
    info!(
        "Display ready: {}x{}",
        lcd.geometry().width(),
        lcd.geometry().height()
    );

    if let Err(e) = draw_title(&mut lcd) {
        error!("Title failed: {}", e);
    }

    let mut history = History::new();
    let mut ticker = Ticker::every(Duration::from_millis(100));
    let mut tick: u32 = 0;

    loop {
        let sample = triangle(tick, CHART_LINES * 8);
        history.write(sample);

        if let Err(e) = draw_frame(&mut lcd, &history, tick) {
            warn!("Frame dropped: {}", e);
        }

        tick = tick.wrapping_add(1);
        ticker.next().await;
    }
}

fn draw_title(lcd: &mut Pcd8544<'static, board::Transport, board::Reset>) -> Result<(), Error> {
    lcd.create_char(WAVE, &WAVE_GLYPH)?;

    lcd.set_cursor(0, 0)?;
    lcd.set_inverse_output(true);
    lcd.write(WAVE)?;
    lcd.print(" stigma ")?;
    lcd.write(WAVE)?;
    lcd.set_inverse_output(false);
    Ok(())
}

fn draw_frame(
    lcd: &mut Pcd8544<'static, board::Transport, board::Reset>,
    history: &History,
    tick: u32,
) -> Result<(), Error> {
    lcd.set_cursor(0, 1)?;
    lcd.clear_line()?;
    // fmt::Error carries nothing; a failed transfer shows up on the next call
    let _ = write!(lcd, "t={} v={}", tick, history.recent().copied().unwrap_or(0));

    let width = lcd.geometry().width() as usize;
    let skip = history.len().saturating_sub(width);

    lcd.set_cursor(0, 2)?;
    for &value in history.oldest_ordered().skip(skip) {
        lcd.draw_column(CHART_LINES, value)?;
    }
    Ok(())
}

/// Triangle wave between 0 and `peak`
fn triangle(tick: u32, peak: u8) -> u8 {
    let period = 2 * peak as u32;
    let phase = tick % period;
    if phase < peak as u32 {
        phase as u8
    } else {
        (period - phase) as u8
    }
}

type Error = stigma_core::Error<stigma_drivers::BusError>;
