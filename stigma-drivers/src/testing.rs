//! Recording embedded-hal mocks shared by the driver tests

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};
use stigma_hal::ByteKind;

use crate::error::Line;

/// Something that happened on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(Line, bool),
    Delay(u32),
    Spi(Vec<u8>),
}

/// Shared, ordered log of pin, delay and SPI activity
#[derive(Clone, Default)]
pub struct Wire {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> WirePin {
        WirePin {
            line,
            wire: self.clone(),
            broken: false,
        }
    }

    /// Pin whose every write fails
    pub fn broken_pin(&self, line: Line) -> WirePin {
        WirePin {
            broken: true,
            ..self.pin(line)
        }
    }

    pub fn delay(&self) -> WireDelay {
        WireDelay { wire: self.clone() }
    }

    pub fn spi(&self) -> WireSpi {
        WireSpi {
            wire: self.clone(),
            broken: false,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Total delay in nanoseconds
    pub fn delayed_ns(&self) -> u64 {
        self.events
            .borrow()
            .iter()
            .map(|e| match e {
                Event::Delay(ns) => *ns as u64,
                _ => 0,
            })
            .sum()
    }

    /// Reassemble bytes the way the panel samples them
    ///
    /// SDIN is latched on each rising SCLK edge while SCE is low, MSB first;
    /// D/C is taken at the eighth bit. Raising SCE drops a partial byte.
    pub fn decode(&self) -> Vec<(ByteKind, u8)> {
        let mut bytes = Vec::new();
        let (mut selected, mut dc, mut sdin, mut clock) = (false, false, false, false);
        let (mut shift, mut bits) = (0u8, 0u8);

        for event in self.events.borrow().iter() {
            let Event::Pin(line, level) = *event else {
                continue;
            };
            match line {
                Line::ChipEnable => {
                    selected = !level;
                    if level {
                        bits = 0;
                    }
                }
                Line::DataCommand => dc = level,
                Line::Data => sdin = level,
                Line::Clock => {
                    if level && !clock && selected {
                        shift = (shift << 1) | sdin as u8;
                        bits += 1;
                        if bits == 8 {
                            let kind = if dc { ByteKind::Data } else { ByteKind::Command };
                            bytes.push((kind, shift));
                            bits = 0;
                        }
                    }
                    clock = level;
                }
                Line::Reset => {}
            }
        }
        bytes
    }

    /// SPI writes paired with the D/C level at the time of the write
    pub fn spi_writes(&self) -> Vec<(bool, Vec<u8>)> {
        let mut dc = false;
        let mut writes = Vec::new();
        for event in self.events.borrow().iter() {
            match event {
                Event::Pin(Line::DataCommand, level) => dc = *level,
                Event::Spi(bytes) => writes.push((dc, bytes.clone())),
                _ => {}
            }
        }
        writes
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

pub struct WirePin {
    line: Line,
    wire: Wire,
    broken: bool,
}

impl ErrorType for WirePin {
    type Error = digital::ErrorKind;
}

impl OutputPin for WirePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

impl WirePin {
    fn set(&mut self, level: bool) -> Result<(), digital::ErrorKind> {
        if self.broken {
            return Err(digital::ErrorKind::Other);
        }
        self.wire.push(Event::Pin(self.line, level));
        Ok(())
    }
}

pub struct WireDelay {
    wire: Wire,
}

impl DelayNs for WireDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.wire.push(Event::Delay(ns));
    }
}

pub struct WireSpi {
    wire: Wire,
    pub broken: bool,
}

impl spi::ErrorType for WireSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for WireSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.broken {
            return Err(spi::ErrorKind::Other);
        }
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                self.wire.push(Event::Spi(bytes.to_vec()));
            }
        }
        Ok(())
    }
}
