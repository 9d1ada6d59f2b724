//! Controller state and its transitions
//!
//! Everything the controller remembers about the panel lives in
//! [`DeviceState`]. Each operation is a pure function from the current state
//! to a [`Transition`]: the next state plus the instructions that bring the
//! hardware in line with it. The display controller only sends those
//! instructions and commits the new state, which keeps the cursor and
//! power rules testable without a bus.

use heapless::Vec;

use crate::config::Geometry;
use crate::protocol::{Dialect, DisplayMode, Instruction, MAX_CONTRAST};

/// Longest instruction sequence produced by a single transition
pub const MAX_COMMANDS: usize = 4;

/// Instructions produced by a transition
pub type Commands = Vec<Instruction, MAX_COMMANDS>;

/// Text cursor: column in pixels, line in row bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub column: u8,
    pub line: u8,
}

impl Cursor {
    /// Top-left cell
    pub const ORIGIN: Cursor = Cursor { column: 0, line: 0 };

    pub const fn new(column: u8, line: u8) -> Self {
        Self { column, line }
    }

    /// Instructions pointing the RAM address at this cell
    pub fn address(self) -> [Instruction; 2] {
        [Instruction::SetX(self.column), Instruction::SetY(self.line)]
    }

    /// Cursor after `columns` pixels of output
    ///
    /// Past the right edge the cursor wraps to column 0 of the next line,
    /// and past the last line back to line 0. Returns whether it wrapped.
    pub fn advanced(self, geometry: Geometry, columns: u16) -> (Cursor, bool) {
        let column = self.column as u16 + columns;
        if column < geometry.width() as u16 {
            return (Cursor::new(column as u8, self.line), false);
        }

        let line = (self.line + 1) % geometry.bands();
        (Cursor::new(0, line), true)
    }
}

/// Everything the controller tracks about the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    /// Power-down bit cleared
    pub powered: bool,
    /// Display in inverse video mode
    pub inverse: bool,
    /// Bits of drawn text and bar charts flipped before sending
    pub inverse_output: bool,
    /// Last requested contrast (0-127)
    pub contrast: u8,
    pub cursor: Cursor,
}

/// Next state plus the instructions that realise it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: DeviceState,
    pub commands: Commands,
}

impl Transition {
    fn new(state: DeviceState, instructions: &[Instruction]) -> Self {
        let mut commands = Commands::new();
        for &instruction in instructions.iter().take(MAX_COMMANDS) {
            // take() keeps this within capacity
            let _ = commands.push(instruction);
        }
        Self { state, commands }
    }

    /// State change with nothing to send
    fn silent(state: DeviceState) -> Self {
        Self::new(state, &[])
    }
}

impl DeviceState {
    /// State right after initialisation
    pub fn initial(contrast: u8) -> Self {
        Self {
            powered: true,
            inverse: false,
            inverse_output: false,
            contrast: contrast.min(MAX_CONTRAST),
            cursor: Cursor::ORIGIN,
        }
    }

    /// Function-set selecting `extended` and keeping the current power bit
    pub fn function_set(&self, extended: bool) -> Instruction {
        Instruction::FunctionSet {
            power_down: !self.powered,
            vertical: false,
            extended,
        }
    }

    /// XOR mask applied to drawn text and bar charts
    pub fn output_mask(&self) -> u8 {
        if self.inverse_output {
            0xFF
        } else {
            0x00
        }
    }

    /// Move the cursor, clamping into the panel
    pub fn locate(self, geometry: Geometry, column: u8, line: u8) -> Transition {
        let cursor = Cursor::new(geometry.clamp_column(column), geometry.clamp_line(line));
        Transition::new(Self { cursor, ..self }, &cursor.address())
    }

    /// Advance past output streamed at the cursor
    ///
    /// The device address auto-increments along with the streamed bytes,
    /// so addressing is only re-sent when the cursor wraps.
    pub fn advance(self, geometry: Geometry, columns: u16) -> Transition {
        let (cursor, wrapped) = self.cursor.advanced(geometry, columns);
        let next = Self { cursor, ..self };
        if wrapped {
            Transition::new(next, &cursor.address())
        } else {
            Transition::silent(next)
        }
    }

    /// Advance after output that moved the device address elsewhere
    ///
    /// Multi-band drawing leaves the address on a different band, so the
    /// new cursor position is always re-sent.
    pub fn skip(self, geometry: Geometry, columns: u16) -> Transition {
        let (cursor, _) = self.cursor.advanced(geometry, columns);
        Transition::new(Self { cursor, ..self }, &cursor.address())
    }

    /// Enter or leave power-down
    pub fn power(self, on: bool) -> Transition {
        let next = Self {
            powered: on,
            ..self
        };
        Transition::new(next, &[next.function_set(false)])
    }

    /// Switch between normal and inverse video
    pub fn invert(self, enabled: bool) -> Transition {
        let mode = if enabled {
            DisplayMode::InverseVideo
        } else {
            DisplayMode::Normal
        };
        Transition::new(
            Self {
                inverse: enabled,
                ..self
            },
            &[Instruction::DisplayControl(mode)],
        )
    }

    /// Flip the bits of subsequent text and bar chart output
    pub fn invert_output(self, enabled: bool) -> Transition {
        Transition::silent(Self {
            inverse_output: enabled,
            ..self
        })
    }

    /// Program a new operating voltage
    ///
    /// The stored level is the request (capped at 127); the voltage sent is
    /// limited to what the variant tolerates.
    pub fn contrast(self, dialect: &Dialect, level: u8) -> Transition {
        let next = Self {
            contrast: level.min(MAX_CONTRAST),
            ..self
        };
        Transition::new(
            next,
            &[
                next.function_set(true),
                Instruction::SetVop(dialect.safe_vop(level)),
                next.function_set(false),
            ],
        )
    }
}
