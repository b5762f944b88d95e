use thiserror::Error;

/// Errors that can occur while building a pin report.
///
/// Most of these never escape [`Readall::generate_report`](crate::Readall::generate_report):
/// failed reads are rendered as blank cells and an unrecognized board becomes a
/// single diagnostic line. Only I/O errors from the output writer propagate.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing the report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Error from the underlying HID API layer.
    #[cfg(feature = "hid")]
    #[error("HID API error: {0}")]
    Hid(#[from] hidapi::HidError),
    /// No expander device was found with the specified VID/PID or path.
    #[error("Device not found with specified VID/PID")]
    DeviceNotFound,
    /// HID feature report operation failed.
    #[error("Feature report error while accessing register 0x{reg_addr:04X}")]
    FeatureReportError {
        /// The register address that was being accessed.
        reg_addr: u16,
    },
    /// Function argument is outside the valid range.
    #[error("Argument out of range: {0}")]
    ArgumentOutOfRange(String),
    /// Physical pin number is outside the valid header range.
    #[error("Physical pin {pin} argument out of range: {message}")]
    PinArgumentOutOfRange {
        /// The invalid pin number that was specified.
        pin: u8,
        /// Detailed error message explaining the constraint.
        message: String,
    },
    /// Alternate function code outside 0-7.
    #[error("Invalid alternate function code {0} (expected 0-7)")]
    InvalidAltFunction(u8),
    /// The detected board model is not one this crate can lay out.
    #[error("unable to determine board type... model: {model}")]
    UnknownBoardModel {
        /// Raw model code returned by board identification.
        model: u32,
    },
    /// The board was recognized but no pin table is available for it.
    #[error("unable to determine board type... no pin table for model: {model}")]
    NoPinTable {
        /// Raw model code returned by board identification.
        model: u32,
    },
    /// An Orange Pi board was detected but no board variant was configured.
    #[error("unable to determine board type... Orange Pi variant not configured")]
    VariantNotConfigured,
    /// The configured Orange Pi variant name is not recognized.
    #[error("Unknown Orange Pi variant '{0}'")]
    UnknownVariant(String),
    /// An external node is already registered; only one is supported.
    #[error("An external node is already registered (pins {pin_base}-{pin_max})")]
    NodeAlreadyRegistered {
        /// First index of the node already registered.
        pin_base: u32,
        /// Last index of the node already registered.
        pin_max: u32,
    },
    /// The pin cannot be read by the state reader.
    #[error("Read not supported for pin {pin}")]
    ReadUnsupported {
        /// Pin number, in whichever numbering scheme was queried.
        pin: u32,
    },
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, Error>;
