//! Internal constants: model codes, table geometry, and HID register addresses.

/// Highest physical header position any board profile uses.
pub const MAX_PHYSICAL_PIN: u8 = 64;

/// Display strings for alternate function codes 0-7.
pub const ALT_LABELS: [&str; 8] = ["IN", "OUT", "ALT5", "ALT4", "ALT0", "ALT1", "ALT2", "OFF"];

/// Upper bound (exclusive) of the virtual index space walked for boards without a header.
pub const FLAT_MAX_INDEX: u32 = 384;

/// Where the device-tree board name is read from.
pub const DEFAULT_MODEL_PATH: &str = "/proc/device-tree/model";

/// Build-time environment value naming the Orange Pi variant.
pub const ORANGEPI_BOARD_ENV: &str = "GPIO_READALL_ORANGEPI_BOARD";

// --- Board model codes (as reported by board identification) ---
pub mod model {
    pub const MODEL_A: u32 = 0;
    pub const MODEL_B: u32 = 1;
    pub const MODEL_B_PLUS: u32 = 2;
    pub const COMPUTE_MODULE: u32 = 3;
    pub const BANANA_PRO: u32 = 4;
    pub const ORANGE_PI: u32 = 5;
}

// --- Board revision codes ---
pub mod revision {
    pub const VERSION_1: u32 = 1;
    pub const VERSION_2: u32 = 2;
}

// --- Header geometry ---
pub mod header {
    /// Pins on the 26-pin header of model A and B boards.
    pub const SHORT: u8 = 26;
    /// Pins on the 40-pin header.
    pub const LONG: u8 = 40;
    /// The P5 pads added by revision 2 boards.
    pub const P5_FIRST: u8 = 51;
    pub const P5_LAST: u8 = 54;
}

// --- USB HID expander (XR2280x EDGE interface) ---
#[cfg(feature = "hid")]
pub mod hid {
    /// Exar Corporation vendor ID.
    pub const EXAR_VID: u16 = 0x04E2;
    /// Product ID of the EDGE (GPIO) HID interface.
    pub const EDGE_PID: u16 = 0x1200;

    pub const REPORT_ID_SET_HID_READ_ADDRESS: u8 = 0x4B;
    pub const REPORT_ID_READ_HID_REGISTER: u8 = 0x5A;

    /// Group 1 function select; only present on 32-GPIO parts.
    pub const REG_FUNC_SEL_1: u16 = 0x03CC;
    pub const REG_STATE_0: u16 = 0x03C4;
    pub const REG_STATE_1: u16 = 0x03D0;

    pub const GPIO_COUNT_SMALL: u8 = 8;
    pub const GPIO_COUNT_LARGE: u8 = 32;
}
