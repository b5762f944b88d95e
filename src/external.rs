//! External expander nodes and their index-only report.

use crate::error::{Error, Result};
use log::{debug, trace};
use std::fmt;
use std::io::Write;

/// A GPIO expander attached outside the SoC.
///
/// The reads return whatever the driver reports, including any sentinel it
/// uses for unsupported pins; the report prints the values verbatim.
pub trait ExternalDevice {
    /// Number of pins the device exposes.
    fn pin_count(&self) -> u32;
    /// Digital value of the pin at `offset` from the node's base.
    fn digital_read(&self, offset: u32) -> i32;
    /// Analog value of the pin at `offset` from the node's base.
    fn analog_read(&self, offset: u32) -> i32;
}

/// An expander mapped onto the index range `pin_base..=pin_max`.
pub struct ExternalNode {
    pin_base: u32,
    pin_max: u32,
    device: Box<dyn ExternalDevice>,
}

impl fmt::Debug for ExternalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalNode")
            .field("pin_base", &self.pin_base)
            .field("pin_max", &self.pin_max)
            .finish_non_exhaustive()
    }
}

impl ExternalNode {
    /// Creates a node over `pin_base..=pin_max`.
    pub fn new(pin_base: u32, pin_max: u32, device: Box<dyn ExternalDevice>) -> Result<Self> {
        if pin_max < pin_base {
            return Err(Error::ArgumentOutOfRange(format!(
                "Node pin range {}-{} is empty",
                pin_base, pin_max
            )));
        }
        Ok(ExternalNode {
            pin_base,
            pin_max,
            device,
        })
    }

    /// Creates a node covering every pin of `device`, starting at `pin_base`.
    pub fn for_device(pin_base: u32, device: Box<dyn ExternalDevice>) -> Result<Self> {
        let count = device.pin_count();
        let pin_max = count
            .checked_sub(1)
            .and_then(|last| pin_base.checked_add(last))
            .ok_or_else(|| {
                Error::ArgumentOutOfRange(format!(
                    "Device with {} pins cannot start at index {}",
                    count, pin_base
                ))
            })?;
        Self::new(pin_base, pin_max, device)
    }

    pub fn pin_base(&self) -> u32 {
        self.pin_base
    }

    pub fn pin_max(&self) -> u32 {
        self.pin_max
    }

    /// Prints `Pin | Digital | Analog` for every index in the node, ascending.
    ///
    /// Both reads are attempted for every pin; there is no mode column because
    /// an expander's pins have no known header shape.
    pub fn render(&self, out: &mut dyn Write) -> Result<()> {
        debug!("External readall over pins {}-{}", self.pin_base, self.pin_max);
        writeln!(out, "+------+---------+--------+")?;
        writeln!(out, "|  Pin | Digital | Analog |")?;
        writeln!(out, "+------+---------+--------+")?;
        for pin in self.pin_base..=self.pin_max {
            let offset = pin - self.pin_base;
            let digital = self.device.digital_read(offset);
            let analog = self.device.analog_read(offset);
            trace!("External pin {}: digital={}, analog={}", pin, digital, analog);
            writeln!(out, "| {:4} |  {:4}   |  {:4}  |", pin, digital, analog)?;
        }
        writeln!(out, "+------+---------+--------+")?;
        Ok(())
    }
}

/// Holds the (at most one) registered external node.
///
/// Registration happens before reports run; a report only looks.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    node: Option<ExternalNode>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node`, failing if another node is already registered.
    pub fn register(&mut self, node: ExternalNode) -> Result<()> {
        if let Some(existing) = &self.node {
            return Err(Error::NodeAlreadyRegistered {
                pin_base: existing.pin_base,
                pin_max: existing.pin_max,
            });
        }
        debug!("Registered external node: pins {}-{}", node.pin_base, node.pin_max);
        self.node = Some(node);
        Ok(())
    }

    /// Removes and returns the registered node, if any.
    pub fn unregister(&mut self) -> Option<ExternalNode> {
        self.node.take()
    }

    pub fn current(&self) -> Option<&ExternalNode> {
        self.node.as_ref()
    }
}
