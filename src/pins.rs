//! Pin naming tables: physical position, GPIO number, virtual number and name.
//!
//! The table contents are board data. The lookups return `Option` so an
//! unmapped slot is never confused with a real pin number.

use crate::board::{BoardInfo, BoardModel, OrangePiVariant};
use crate::consts;
use crate::gpio::{GpioNumber, PhysicalPin, VirtualPin};
use log::trace;

/// Per-board mapping between the three numbering schemes.
pub trait PinMap {
    fn physical_to_gpio(&self, pin: PhysicalPin) -> Option<GpioNumber>;
    fn physical_to_virtual(&self, pin: PhysicalPin) -> Option<VirtualPin>;
    /// Display name of the header slot. Power and ground slots have names too.
    fn pin_name(&self, pin: PhysicalPin) -> &str;
    fn virtual_to_gpio(&self, pin: VirtualPin) -> Option<GpioNumber>;
}

/// Table-backed [`PinMap`]. Physical tables are indexed by header position
/// (index 0 unused), the virtual table by virtual pin number.
#[derive(Debug, Clone, Copy)]
pub struct StaticPinMap {
    pub name: &'static str,
    pub phys_to_gpio: &'static [Option<u32>],
    pub phys_to_virtual: &'static [Option<u32>],
    pub phys_names: &'static [&'static str],
    pub virtual_to_gpio: &'static [Option<u32>],
}

impl PinMap for StaticPinMap {
    fn physical_to_gpio(&self, pin: PhysicalPin) -> Option<GpioNumber> {
        let gpio = self
            .phys_to_gpio
            .get(usize::from(pin.number()))
            .copied()
            .flatten()
            .map(GpioNumber);
        trace!("{}: physical {} -> gpio {:?}", self.name, pin.number(), gpio);
        gpio
    }

    fn physical_to_virtual(&self, pin: PhysicalPin) -> Option<VirtualPin> {
        self.phys_to_virtual
            .get(usize::from(pin.number()))
            .copied()
            .flatten()
            .map(VirtualPin)
    }

    fn pin_name(&self, pin: PhysicalPin) -> &str {
        self.phys_names
            .get(usize::from(pin.number()))
            .copied()
            .unwrap_or("")
    }

    fn virtual_to_gpio(&self, pin: VirtualPin) -> Option<GpioNumber> {
        usize::try_from(pin.0)
            .ok()
            .and_then(|idx| self.virtual_to_gpio.get(idx))
            .copied()
            .flatten()
            .map(GpioNumber)
    }
}

/// Picks a built-in table for the identified board, if there is one.
pub fn builtin_for(
    info: &BoardInfo,
    variant: Option<OrangePiVariant>,
) -> Option<&'static StaticPinMap> {
    match BoardModel::try_from(info.model).ok()? {
        BoardModel::ModelA | BoardModel::ModelB if info.revision == consts::revision::VERSION_1 => {
            Some(&RPI_REV1)
        }
        BoardModel::ModelA | BoardModel::ModelB | BoardModel::ModelBPlus => Some(&RPI_REV2),
        BoardModel::ComputeModule => Some(&RPI_CM),
        BoardModel::OrangePi if variant == Some(OrangePiVariant::Zero) => Some(&ORANGE_PI_ZERO),
        BoardModel::BananaPro | BoardModel::OrangePi => None,
    }
}

/// Supplies the pin table matching an identified board.
pub trait PinTableSource {
    /// Returns `None` when no table is known for this board.
    fn table_for(&self, info: &BoardInfo, variant: Option<OrangePiVariant>) -> Option<&dyn PinMap>;
}

/// The tables compiled into this crate, chosen with [`builtin_for`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTables;

impl PinTableSource for BuiltinTables {
    fn table_for(&self, info: &BoardInfo, variant: Option<OrangePiVariant>) -> Option<&dyn PinMap> {
        builtin_for(info, variant).map(|table| table as &dyn PinMap)
    }
}

const fn identity<const N: usize>() -> [Option<u32>; N] {
    let mut table = [None; N];
    let mut i = 0;
    while i < N {
        table[i] = Some(i as u32);
        i += 1;
    }
    table
}

// --- Raspberry Pi ---

const RPI_NAMES: [&str; 55] = [
    "",
    "3.3v", "5v",
    "SDA.1", "5v",
    "SCL.1", "0v",
    "GPIO. 7", "TxD",
    "0v", "RxD",
    "GPIO. 0", "GPIO. 1",
    "GPIO. 2", "0v",
    "GPIO. 3", "GPIO. 4",
    "3.3v", "GPIO. 5",
    "MOSI", "0v",
    "MISO", "GPIO. 6",
    "SCLK", "CE0",
    "0v", "CE1",
    "SDA.0", "SCL.0",
    "GPIO.21", "0v",
    "GPIO.22", "GPIO.26",
    "GPIO.23", "0v",
    "GPIO.24", "GPIO.27",
    "GPIO.25", "GPIO.28",
    "0v", "GPIO.29",
    "", "", "", "", "", "", "", "", "", "",
    "GPIO.17", "GPIO.18",
    "GPIO.19", "GPIO.20",
];

const RPI_PHYS_TO_VIRTUAL: [Option<u32>; 55] = [
    None,
    None, None,
    Some(8), None,
    Some(9), None,
    Some(7), Some(15),
    None, Some(16),
    Some(0), Some(1),
    Some(2), None,
    Some(3), Some(4),
    None, Some(5),
    Some(12), None,
    Some(13), Some(6),
    Some(14), Some(10),
    None, Some(11),
    Some(30), Some(31),
    Some(21), None,
    Some(22), Some(26),
    Some(23), None,
    Some(24), Some(27),
    Some(25), Some(28),
    None, Some(29),
    None, None, None, None, None, None, None, None, None, None,
    Some(17), Some(18),
    Some(19), Some(20),
];

/// Raspberry Pi model A/B, board revision 1 (26-pin header).
pub static RPI_REV1: StaticPinMap = StaticPinMap {
    name: "Raspberry Pi rev 1",
    phys_to_gpio: &[
        None,
        None, None,
        Some(0), None,
        Some(1), None,
        Some(4), Some(14),
        None, Some(15),
        Some(17), Some(18),
        Some(21), None,
        Some(22), Some(23),
        None, Some(24),
        Some(10), None,
        Some(9), Some(25),
        Some(11), Some(8),
        None, Some(7),
    ],
    phys_to_virtual: &RPI_PHYS_TO_VIRTUAL,
    phys_names: &RPI_NAMES,
    virtual_to_gpio: &[
        Some(17), Some(18), Some(21), Some(22), Some(23), Some(24), Some(25), Some(4),
        Some(0), Some(1), Some(8), Some(7), Some(10), Some(9), Some(11), Some(14),
        Some(15),
    ],
};

/// Raspberry Pi revision 2 boards and the B+ (40-pin header, P5 pads 51-54).
pub static RPI_REV2: StaticPinMap = StaticPinMap {
    name: "Raspberry Pi rev 2",
    phys_to_gpio: &[
        None,
        None, None,
        Some(2), None,
        Some(3), None,
        Some(4), Some(14),
        None, Some(15),
        Some(17), Some(18),
        Some(27), None,
        Some(22), Some(23),
        None, Some(24),
        Some(10), None,
        Some(9), Some(25),
        Some(11), Some(8),
        None, Some(7),
        Some(0), Some(1),
        Some(5), None,
        Some(6), Some(12),
        Some(13), None,
        Some(19), Some(16),
        Some(26), Some(20),
        None, Some(21),
        None, None, None, None, None, None, None, None, None, None,
        Some(28), Some(29),
        Some(30), Some(31),
    ],
    phys_to_virtual: &RPI_PHYS_TO_VIRTUAL,
    phys_names: &RPI_NAMES,
    virtual_to_gpio: &[
        Some(17), Some(18), Some(27), Some(22), Some(23), Some(24), Some(25), Some(4),
        Some(2), Some(3), Some(8), Some(7), Some(10), Some(9), Some(11), Some(14),
        Some(15), Some(28), Some(29), Some(30), Some(31), Some(5), Some(6), Some(13),
        Some(19), Some(26), Some(12), Some(16), Some(20), Some(21), Some(0), Some(1),
    ],
};

const CM_VIRTUAL_TO_GPIO: [Option<u32>; 54] = identity::<54>();

/// Compute module: no header, virtual index N is GPIO N for the 54 BCM lines.
pub static RPI_CM: StaticPinMap = StaticPinMap {
    name: "Raspberry Pi compute module",
    phys_to_gpio: &[],
    phys_to_virtual: &[],
    phys_names: &[],
    virtual_to_gpio: &CM_VIRTUAL_TO_GPIO,
};

// --- Orange Pi ---

/// Orange Pi Zero (26-pin header plus the 27/28 row).
pub static ORANGE_PI_ZERO: StaticPinMap = StaticPinMap {
    name: "Orange Pi Zero",
    phys_to_gpio: &[
        None,
        None, None,
        Some(12), None,
        Some(11), None,
        Some(6), Some(198),
        None, Some(199),
        Some(1), Some(7),
        Some(0), None,
        Some(3), Some(19),
        None, Some(18),
        Some(15), None,
        Some(16), Some(2),
        Some(14), Some(13),
        None, Some(10),
        None, None,
    ],
    phys_to_virtual: &[
        None,
        None, None,
        Some(0), None,
        Some(1), None,
        Some(2), Some(3),
        None, Some(4),
        Some(5), Some(6),
        Some(7), None,
        Some(8), Some(9),
        None, Some(10),
        Some(11), None,
        Some(12), Some(13),
        Some(14), Some(15),
        None, Some(16),
        None, None,
    ],
    phys_names: &[
        "",
        "3.3V", "5V",
        "SDA.0", "5V",
        "SCL.0", "GND",
        "PWM.1", "TXD.1",
        "GND", "RXD.1",
        "RXD.2", "PA07",
        "TXD.2", "GND",
        "CTS.2", "SDA.1",
        "3.3V", "SCL.1",
        "MOSI.1", "GND",
        "MISO.1", "RTS.2",
        "SCLK.1", "CE.1",
        "GND", "PA10",
        "5V", "GND",
    ],
    virtual_to_gpio: &[
        Some(12), Some(11), Some(6), Some(198), Some(199), Some(1), Some(7), Some(0),
        Some(3), Some(19), Some(18), Some(15), Some(16), Some(2), Some(14), Some(13),
        Some(10),
    ],
};
