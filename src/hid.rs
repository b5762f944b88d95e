//! USB HID GPIO expander backend (XR2280x EDGE interface).
//!
//! Only register reads are issued: the EDGE state registers for pin levels,
//! plus one probe of the group 1 function-select register to tell 8-GPIO
//! parts from 32-GPIO parts.

use crate::consts::hid as consts;
use crate::error::{Error, Result};
use crate::external::ExternalDevice;
use hidapi::{HidApi, HidDevice};
use log::{debug, trace, warn};
use std::ffi::CStr;

/// Value returned for reads the expander cannot answer.
pub const UNSUPPORTED_READING: i32 = -1;

/// An XR2280x EDGE interface used as an external node.
#[derive(Debug)]
pub struct HidExpander {
    device: HidDevice,
    gpio_count: u8,
}

impl HidExpander {
    /// Opens the first EDGE interface with the default Exar VID/PID.
    /// **Warning:** Ambiguous if multiple devices exist.
    pub fn open_first(hid_api: &HidApi) -> Result<Self> {
        Self::open_by_vid_pid(hid_api, consts::EXAR_VID, consts::EDGE_PID)
    }

    /// Opens an EDGE interface by Vendor ID and Product ID.
    pub fn open_by_vid_pid(hid_api: &HidApi, vid: u16, pid: u16) -> Result<Self> {
        let device = hid_api.open(vid, pid).map_err(|e| {
            debug!("open {:04X}:{:04X} failed: {}", vid, pid, e);
            Error::DeviceNotFound
        })?;
        debug!("Opened HID expander: VID={:04X}, PID={:04X}", vid, pid);
        Self::from_hid_device(device)
    }

    /// Opens an EDGE interface by its platform-specific path.
    pub fn open_by_path(hid_api: &HidApi, path: &CStr) -> Result<Self> {
        let device = hid_api.open_path(path)?;
        debug!("Opened HID expander at {:?}", path);
        Self::from_hid_device(device)
    }

    /// Wraps an already opened EDGE interface and detects its GPIO count.
    pub fn from_hid_device(device: HidDevice) -> Result<Self> {
        let mut expander = HidExpander {
            device,
            gpio_count: consts::GPIO_COUNT_SMALL,
        };
        expander.gpio_count = match expander.read_hid_register(consts::REG_FUNC_SEL_1) {
            Ok(_) => {
                debug!("Detected support for 32 GPIOs");
                consts::GPIO_COUNT_LARGE
            }
            Err(Error::FeatureReportError { .. }) => {
                debug!("Detected support for 8 GPIOs");
                consts::GPIO_COUNT_SMALL
            }
            Err(e) => {
                warn!("Error during capability detection: {}", e);
                return Err(e);
            }
        };
        Ok(expander)
    }

    /// Number of GPIOs reachable through this interface (8 or 32).
    pub fn gpio_count(&self) -> u8 {
        self.gpio_count
    }

    /// Reads the level of GPIO `pin` (E0-E31) from the EDGE state registers.
    pub fn read_level(&self, pin: u8) -> Result<bool> {
        if pin >= self.gpio_count {
            return Err(Error::ReadUnsupported { pin: u32::from(pin) });
        }
        let (reg, mask) = state_register(pin);
        let value = self.read_hid_register(reg)?;
        trace!(
            "Read EDGE_STATE pin {}: reg=0x{:04X}, mask=0x{:04X}, value=0x{:04X}",
            pin,
            reg,
            mask,
            value
        );
        Ok(value & mask != 0)
    }

    fn set_hid_read_address(&self, reg_addr: u16) -> Result<()> {
        let [lo, hi] = reg_addr.to_le_bytes();
        let buf = [consts::REPORT_ID_SET_HID_READ_ADDRESS, lo, hi];
        trace!("Writing Feature Report (Set Read Addr {:04X}): {:02X?}", reg_addr, &buf[..]);
        self.device.send_feature_report(&buf).map_err(|e| {
            trace!("send_feature_report error: {}", e);
            Error::FeatureReportError { reg_addr }
        })
    }

    fn read_hid_register(&self, reg_addr: u16) -> Result<u16> {
        self.set_hid_read_address(reg_addr)?;
        let mut buf = [0u8; 3];
        buf[0] = consts::REPORT_ID_READ_HID_REGISTER;
        match self.device.get_feature_report(&mut buf) {
            Ok(len) if len == buf.len() && buf[0] == consts::REPORT_ID_READ_HID_REGISTER => {
                let value = u16::from_le_bytes([buf[1], buf[2]]);
                trace!("Read Reg 0x{:04X} = 0x{:04X}", reg_addr, value);
                Ok(value)
            }
            Ok(len) => {
                warn!(
                    "get_feature_report returned unexpected report (id {:02X}, {} bytes)",
                    buf[0], len
                );
                Err(Error::FeatureReportError { reg_addr })
            }
            Err(e) => {
                trace!("get_feature_report error: {}", e);
                Err(Error::FeatureReportError { reg_addr })
            }
        }
    }
}

/// EDGE state register and bit mask holding the level of `pin`.
/// E0-E15 are in group 0, E16-E31 in group 1.
fn state_register(pin: u8) -> (u16, u16) {
    let reg = if pin < 16 {
        consts::REG_STATE_0
    } else {
        consts::REG_STATE_1
    };
    (reg, 1u16 << (pin % 16))
}

impl ExternalDevice for HidExpander {
    fn pin_count(&self) -> u32 {
        u32::from(self.gpio_count)
    }

    fn digital_read(&self, offset: u32) -> i32 {
        let level = u8::try_from(offset)
            .map_err(|_| Error::ReadUnsupported { pin: offset })
            .and_then(|pin| self.read_level(pin));
        match level {
            Ok(high) => i32::from(high),
            Err(e) => {
                warn!("Digital read of expander pin {} failed: {}", offset, e);
                UNSUPPORTED_READING
            }
        }
    }

    /// The EDGE interface has no analog inputs.
    fn analog_read(&self, _offset: u32) -> i32 {
        UNSUPPORTED_READING
    }
}
