//! Pin identifiers, numbering schemes, and the live-state reader seam.

use crate::consts;
use crate::error::{Error, Result};
use std::fmt;

/// Represents a valid physical header position (1-64).
/// Use `PhysicalPin::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysicalPin(pub(crate) u8);

impl PhysicalPin {
    /// Creates a new PhysicalPin, returning an error if the number is out of range.
    pub fn new(pin_num: u8) -> Result<Self> {
        if (1..=consts::MAX_PHYSICAL_PIN).contains(&pin_num) {
            Ok(PhysicalPin(pin_num))
        } else {
            Err(Error::PinArgumentOutOfRange {
                pin: pin_num,
                message: format!("Physical pin must be 1-{}", consts::MAX_PHYSICAL_PIN),
            })
        }
    }

    /// Returns the 1-based header position.
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// True for the left (odd) column of a header row.
    #[inline]
    pub fn is_left_column(&self) -> bool {
        self.0 % 2 == 1
    }
}

/// SoC-level GPIO line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpioNumber(pub u32);

/// Library-internal ("wPi") pin number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualPin(pub u32);

impl fmt::Display for GpioNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for VirtualPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which numbering scheme mode/value queries are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum NumberingMode {
    Gpio,
    Physical,
    #[default]
    Virtual,
}

/// A pin identifier handed to a [`PinStateReader`], tagged with its scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectivePin {
    pub mode: NumberingMode,
    pub number: u32,
}

impl EffectivePin {
    /// Picks the identifier for `mode` out of a pin's three numbers.
    ///
    /// Returns `None` when the scheme has no number for this pin (e.g. a
    /// physical slot with no virtual mapping in `Virtual` mode).
    pub fn select(
        mode: NumberingMode,
        physical: PhysicalPin,
        gpio: GpioNumber,
        virtual_pin: Option<VirtualPin>,
    ) -> Option<Self> {
        let number = match mode {
            NumberingMode::Gpio => gpio.0,
            NumberingMode::Physical => u32::from(physical.0),
            NumberingMode::Virtual => virtual_pin?.0,
        };
        Some(EffectivePin { mode, number })
    }
}

/// The current operating mode of a pin.
///
/// Discriminants are the register codes (0-7), which is why the alternate
/// functions are not in numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AltFunction {
    Input = 0,
    Output = 1,
    Alt5 = 2,
    Alt4 = 3,
    Alt0 = 4,
    Alt1 = 5,
    Alt2 = 6,
    Off = 7,
}

impl AltFunction {
    pub const ALL: [AltFunction; 8] = [
        AltFunction::Input,
        AltFunction::Output,
        AltFunction::Alt5,
        AltFunction::Alt4,
        AltFunction::Alt0,
        AltFunction::Alt1,
        AltFunction::Alt2,
        AltFunction::Off,
    ];

    /// Decodes a register code, rejecting anything outside 0-7.
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(Error::InvalidAltFunction(code))
    }

    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        consts::ALT_LABELS[usize::from(self.code())]
    }
}

impl fmt::Display for AltFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    /// `0` or `1`, as shown in the header table.
    pub fn digit(&self) -> &'static str {
        match self {
            PinLevel::Low => "0",
            PinLevel::High => "1",
        }
    }

    /// `Low` or `High`, as shown in the flat table.
    pub fn label(&self) -> &'static str {
        match self {
            PinLevel::Low => "Low",
            PinLevel::High => "High",
        }
    }
}

/// Live state access for board pins.
///
/// Both reads are side-effect free. An `Err` is the "unknown" state: the
/// report renders it as a blank cell and carries on.
pub trait PinStateReader {
    /// Current alternate function of the pin.
    fn alt_function(&self, pin: EffectivePin) -> Result<AltFunction>;
    /// Current digital level of the pin.
    fn digital_read(&self, pin: EffectivePin) -> Result<PinLevel>;
}
