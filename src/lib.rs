//! # gpio-readall
//!
//! A Rust crate that renders the "readall" pin table of a single-board
//! computer: for every physical header pin, its SoC GPIO number, its virtual
//! (wPi) number, its name, its current mode and its live level.
//!
//! The report is strictly read-only. Nothing in this crate writes or
//! reconfigures a pin.
//!
//! ## Features
//!
//! *   Three numbering schemes (`NumberingMode::Gpio`, `Physical`, `Virtual`),
//!     chosen per report and passed explicitly to the renderer.
//! *   Board layouts for Raspberry Pi model A/B (revision 1 and 2, including
//!     the P5 pads), B+, the compute module (flat index table), Banana Pro,
//!     and the Orange Pi family (variant configured explicitly).
//! *   Unmapped pins and failed reads render as blank cells; they are never
//!     shown as a made-up number.
//! *   External expander reports: when a node is registered, the report lists
//!     digital and analog values over the node's index range instead.
//! *   A USB HID expander backend for XR2280x EDGE interfaces (`hid` feature,
//!     on by default).
//!
//! ## Collaborators
//!
//! The crate does not probe hardware for the board report. The caller
//! provides:
//!
//! *   a [`BoardIdentifier`] (a [`BoardInfo`] works as-is),
//! *   a [`PinTableSource`] that hands out the [`PinMap`] of the identified
//!     board ([`BuiltinTables`] has tables for common boards),
//! *   a [`PinStateReader`] returning the current alternate function and level.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use gpio_readall::{
//!     codes, AltFunction, BoardInfo, BuiltinTables, EffectivePin, NodeRegistry, NumberingMode,
//!     PinLevel, PinStateReader, Readall, ReportConfig, Result,
//! };
//!
//! struct Registers;
//!
//! impl PinStateReader for Registers {
//!     fn alt_function(&self, _pin: EffectivePin) -> Result<AltFunction> {
//!         Ok(AltFunction::Input)
//!     }
//!     fn digital_read(&self, _pin: EffectivePin) -> Result<PinLevel> {
//!         Ok(PinLevel::Low)
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let board = BoardInfo {
//!         model: codes::model::MODEL_B,
//!         revision: codes::revision::VERSION_2,
//!         ..Default::default()
//!     };
//!     let nodes = NodeRegistry::new();
//!     let config = ReportConfig::default().with_numbering(NumberingMode::Gpio);
//!
//!     Readall::new(&board, &BuiltinTables, &Registers, &nodes, config).print_report()
//! }
//! ```
//!
//! ## External Expanders
//!
//! ```no_run
//! # #[cfg(feature = "hid")]
//! # fn main() -> gpio_readall::Result<()> {
//! use gpio_readall::{hid::HidExpander, ExternalNode, NodeRegistry};
//! use hidapi::HidApi;
//!
//! let hid_api = HidApi::new()?;
//! let expander = HidExpander::open_first(&hid_api)?;
//! let mut nodes = NodeRegistry::new();
//! nodes.register(ExternalNode::for_device(100, Box::new(expander))?)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "hid"))]
//! # fn main() {}
//! ```
//!
//! ## License
//!
//! This project is licensed under the WTFPL.

mod consts;
mod error;

pub mod board;
pub mod config;
pub mod external;
pub mod gpio;
#[cfg(feature = "hid")]
pub mod hid;
pub mod layout;
pub mod pins;
pub mod render;
pub mod report;

pub use board::{BoardIdentifier, BoardInfo, BoardModel, OrangePiVariant};
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use external::{ExternalDevice, ExternalNode, NodeRegistry};
pub use gpio::{
    AltFunction, EffectivePin, GpioNumber, NumberingMode, PhysicalPin, PinLevel, PinStateReader,
    VirtualPin,
};
pub use layout::{BoardLayout, FlatLayout, HeaderLayout, PinSection};
pub use pins::{BuiltinTables, PinMap, PinTableSource, StaticPinMap};
pub use report::Readall;

// --- Re-export the identification codes needed to build a BoardInfo ---
/// Raw board model and revision codes, as reported by board identification.
pub mod codes {
    pub use crate::consts::model;
    pub use crate::consts::revision;
}
