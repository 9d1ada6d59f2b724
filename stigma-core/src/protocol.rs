//! PCD8544 instruction set and per-variant command tables
//!
//! Instructions come in a basic and an extended set, selected by the H bit
//! of function-set. Addressing and display control live in the basic set;
//! operating voltage, bias and temperature coefficient in the extended set.
//!
//! | Instruction      | Set      | Encoding      |
//! |------------------|----------|---------------|
//! | Function set     | both     | `0010_0PVH`   |
//! | Display control  | basic    | `0000_1D0E`   |
//! | Set Y (band)     | basic    | `0100_YYYY`   |
//! | Set X (column)   | basic    | `1XXX_XXXX`   |
//! | Temp coefficient | extended | `0000_01TT`   |
//! | Bias system      | extended | `0001_0BBB`   |
//! | Set Vop          | extended | `1VVV_VVVV`   |
//!
//! The PCD8544 only decodes three Y bits (six bands); the ST7576 uses the
//! fourth for its ninth band.

/// Largest contrast (Vop) value representable in the instruction
pub const MAX_CONTRAST: u8 = 0x7F;

/// Bias system value for a 1:48 multiplex panel
pub const BIAS_1_48: u8 = 0b011;

/// Display control modes (D and E bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayMode {
    /// All segments off
    Blank = 0b000,
    /// All segments on, ignoring RAM
    AllSegmentsOn = 0b001,
    /// RAM contents, set bit = dark pixel
    Normal = 0b100,
    /// RAM contents, set bit = light pixel
    InverseVideo = 0b101,
}

impl DisplayMode {
    /// Decode the D/E bits of a display control byte
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b101 {
            0b001 => DisplayMode::AllSegmentsOn,
            0b100 => DisplayMode::Normal,
            0b101 => DisplayMode::InverseVideo,
            _ => DisplayMode::Blank,
        }
    }
}

/// Controller instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Power-down (PD), vertical addressing (V) and instruction set (H)
    FunctionSet {
        power_down: bool,
        vertical: bool,
        extended: bool,
    },
    /// Blank / all on / normal / inverse
    DisplayControl(DisplayMode),
    /// Row band address
    SetY(u8),
    /// Column address
    SetX(u8),
    /// Temperature coefficient (0-3)
    TemperatureCoefficient(u8),
    /// Bias system (0-7)
    Bias(u8),
    /// Operating voltage, i.e. contrast (0-127)
    SetVop(u8),
    /// ST7576 partial display mode
    PartialDisplay,
}

impl Instruction {
    /// Encode as the byte sent with D/C low
    pub fn encode(self) -> u8 {
        match self {
            Instruction::FunctionSet {
                power_down,
                vertical,
                extended,
            } => 0x20 | ((power_down as u8) << 2) | ((vertical as u8) << 1) | extended as u8,
            Instruction::DisplayControl(mode) => 0x08 | mode as u8,
            Instruction::SetY(y) => 0x40 | (y & 0x0F),
            Instruction::SetX(x) => 0x80 | (x & 0x7F),
            Instruction::TemperatureCoefficient(tc) => 0x04 | (tc & 0x03),
            Instruction::Bias(bias) => 0x10 | (bias & 0x07),
            Instruction::SetVop(vop) => 0x80 | (vop & MAX_CONTRAST),
            Instruction::PartialDisplay => 0x05,
        }
    }

    /// Check whether the extended instruction set must be active (H=1)
    ///
    /// Function-set is accepted in both sets.
    pub fn is_extended(self) -> bool {
        matches!(
            self,
            Instruction::TemperatureCoefficient(_)
                | Instruction::Bias(_)
                | Instruction::SetVop(_)
                | Instruction::PartialDisplay
        )
    }
}

/// Command table for one controller variant
#[derive(Debug)]
pub struct Dialect {
    /// Chip name
    pub name: &'static str,
    /// Columns of display RAM
    pub ram_columns: u8,
    /// Row bands of display RAM
    pub ram_bands: u8,
    /// Vop programmed at power-up
    pub default_vop: u8,
    /// Lowest Vop the glass tolerates
    pub vop_min: u8,
    /// Highest Vop the glass tolerates
    pub vop_max: u8,
    /// Bias system value
    pub bias: u8,
    /// Extra extended-set instructions issued after Vop during power-up
    pub extended_init: &'static [Instruction],
}

impl Dialect {
    /// Limit a contrast level to the variant's safe operating voltage
    pub fn safe_vop(&self, level: u8) -> u8 {
        level.min(MAX_CONTRAST).clamp(self.vop_min, self.vop_max)
    }

    /// Instructions from reset to "all segments on", ahead of the RAM clear
    ///
    /// Leaves the controller in the basic instruction set, powered up,
    /// with horizontal addressing.
    pub fn power_up(&self, vop: u8) -> impl Iterator<Item = Instruction> + '_ {
        let extended = Instruction::FunctionSet {
            power_down: false,
            vertical: false,
            extended: true,
        };
        let basic = Instruction::FunctionSet {
            power_down: false,
            vertical: false,
            extended: false,
        };

        [
            extended,
            Instruction::Bias(self.bias),
            Instruction::SetVop(self.safe_vop(vop)),
        ]
        .into_iter()
        .chain(self.extended_init.iter().copied())
        .chain([basic, Instruction::DisplayControl(DisplayMode::AllSegmentsOn)])
    }
}

/// Philips PCD8544
///
/// Default Vop 3.06 V + 66 * 0.06 V = 7 V. Vop above 90 (8.46 V) risks the
/// glass at low temperature.
pub static PCD8544: Dialect = Dialect {
    name: "PCD8544",
    ram_columns: 84,
    ram_bands: 6,
    default_vop: 0x42,
    vop_min: 0,
    vop_max: 90,
    bias: BIAS_1_48,
    extended_init: &[],
};

/// Sitronix ST7576
///
/// Too faint at the PCD8544 default, so power-up uses a higher Vop. Below
/// 36 (2.94 V + 36 * 0.03 V = 4.02 V) the datasheet minimum is violated.
pub static ST7576: Dialect = Dialect {
    name: "ST7576",
    ram_columns: 102,
    ram_bands: 9,
    default_vop: 0x60,
    vop_min: 36,
    vop_max: MAX_CONTRAST,
    bias: BIAS_1_48,
    extended_init: &[Instruction::PartialDisplay],
};
