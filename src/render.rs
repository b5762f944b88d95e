//! Table rendering for header and flat layouts.

use crate::error::{Error, Result};
use crate::gpio::{AltFunction, EffectivePin, NumberingMode, PhysicalPin, PinLevel, PinStateReader, VirtualPin};
use crate::layout::{BoardLayout, FlatLayout, HeaderLayout};
use crate::pins::PinMap;
use log::{debug, trace};
use std::io::Write;

const HEADER_SEPARATOR: &str =
    "+------+-----+----------+------+---+----++----+---+------+----------+-----+------+";
const BORDER_LEFT: &str = "+------+-----+----------+------+---+";
const BORDER_RIGHT: &str = "+---+------+----------+-----+------+";

const FLAT_SEPARATOR: &str = "+----------+-----+------+-------+";
const FLAT_COLUMNS: &str = "|   GPIO   | wPi | Mode | Value |";

/// Display cells for one physical pin. Empty strings are blank cells.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PinCells<'a> {
    gpio: String,
    wpi: String,
    name: &'a str,
    mode: String,
    value: String,
}

impl<'a> PinCells<'a> {
    fn unmapped(name: &'a str) -> Self {
        PinCells {
            gpio: String::new(),
            wpi: String::new(),
            name,
            mode: String::new(),
            value: String::new(),
        }
    }
}

/// Renders board tables from the pin tables and live pin state.
///
/// The numbering mode decides which identifier mode and level queries use;
/// it is fixed for the lifetime of the renderer.
pub struct Renderer<'a> {
    pins: &'a dyn PinMap,
    reader: &'a dyn PinStateReader,
    numbering: NumberingMode,
}

impl<'a> Renderer<'a> {
    pub fn new(pins: &'a dyn PinMap, reader: &'a dyn PinStateReader, numbering: NumberingMode) -> Self {
        Renderer {
            pins,
            reader,
            numbering,
        }
    }

    pub fn render_layout(&self, layout: &BoardLayout, out: &mut dyn Write) -> Result<()> {
        match layout {
            BoardLayout::Header(header) => self.render_header(header, out),
            BoardLayout::Flat(flat) => self.render_flat(flat, out),
        }
    }

    /// Renders a two-column header, one row per pin pair, framed by the title.
    pub fn render_header(&self, layout: &HeaderLayout, out: &mut dyn Write) -> Result<()> {
        let border = format!("{}{:-^10}{}", BORDER_LEFT, layout.title, BORDER_RIGHT);
        let columns = format!(
            "| {:^4} | wPi |   Name   | Mode | V | Physical | V | Mode |   Name   | wPi | {:^4} |",
            layout.gpio_label, layout.gpio_label
        );

        writeln!(out, "{}", border)?;
        writeln!(out, "{}", columns)?;
        for section in &layout.sections {
            trace!("Pin section {}-{}", section.first(), section.last());
            writeln!(out, "{}", HEADER_SEPARATOR)?;
            for left in section.rows() {
                self.render_pair(left, out)?;
            }
        }
        writeln!(out, "{}", HEADER_SEPARATOR)?;
        writeln!(out, "{}", columns)?;
        writeln!(out, "{}", border)?;
        Ok(())
    }

    /// Renders the header row holding `left` and the pin to its right.
    ///
    /// The left pin is resolved completely before the right one. Columns of
    /// the right pin are mirrored, so the row reads like the header itself.
    /// Fails without writing anything if `left` is an even (right column) pin.
    pub fn render_pair(&self, left: PhysicalPin, out: &mut dyn Write) -> Result<()> {
        if !left.is_left_column() {
            return Err(Error::PinArgumentOutOfRange {
                pin: left.number(),
                message: "Header rows start on an odd pin".to_string(),
            });
        }
        let right = PhysicalPin::new(left.number() + 1)?;
        let l = self.resolve(left);
        let r = self.resolve(right);
        writeln!(
            out,
            "| {:>4} | {:>3} | {:>8} | {:>4} | {:>1} | {:>2} || {:<2} | {:<1} | {:<4} | {:<8} | {:<3} | {:<4} |",
            l.gpio,
            l.wpi,
            l.name,
            l.mode,
            l.value,
            left.number(),
            right.number(),
            r.value,
            r.mode,
            r.name,
            r.wpi,
            r.gpio
        )?;
        Ok(())
    }

    /// Renders one row per mapped virtual index; unmapped indices are skipped.
    ///
    /// A flat board has no header, so there is no physical number to use and
    /// the index is the only identifier: every query is tagged
    /// [`NumberingMode::Virtual`] whatever numbering the renderer was built with.
    pub fn render_flat(&self, layout: &FlatLayout, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", FLAT_SEPARATOR)?;
        writeln!(out, "{}", FLAT_COLUMNS)?;
        writeln!(out, "{}", FLAT_SEPARATOR)?;
        for index in 0..layout.max_index {
            let Some(gpio) = self.pins.virtual_to_gpio(VirtualPin(index)) else {
                continue;
            };
            let pin = EffectivePin {
                mode: NumberingMode::Virtual,
                number: index,
            };
            let mode = self.read_alt(pin).map(|alt| alt.label()).unwrap_or("");
            let value = self.read_level(pin).map(|level| level.label()).unwrap_or("");
            writeln!(out, "| gpio-{:<3} | {:<3} | {:<4} | {:<5} |", gpio, index, mode, value)?;
        }
        writeln!(out, "{}", FLAT_SEPARATOR)?;
        Ok(())
    }

    fn resolve(&self, pin: PhysicalPin) -> PinCells<'a> {
        let name = self.pins.pin_name(pin);
        let Some(gpio) = self.pins.physical_to_gpio(pin) else {
            return PinCells::unmapped(name);
        };
        let virtual_pin = self.pins.physical_to_virtual(pin);

        let (mode, value) = match EffectivePin::select(self.numbering, pin, gpio, virtual_pin) {
            Some(effective) => (
                self.read_alt(effective).map(|alt| alt.label()),
                self.read_level(effective).map(|level| level.digit()),
            ),
            None => {
                trace!("Pin {} has no {:?} number", pin.number(), self.numbering);
                (None, None)
            }
        };

        PinCells {
            gpio: gpio.to_string(),
            wpi: virtual_pin.map(|v| v.to_string()).unwrap_or_default(),
            name,
            mode: mode.unwrap_or("").to_string(),
            value: value.unwrap_or("").to_string(),
        }
    }

    fn read_alt(&self, pin: EffectivePin) -> Option<AltFunction> {
        self.reader
            .alt_function(pin)
            .inspect_err(|e| debug!("Mode of {:?} unknown: {}", pin, e))
            .ok()
    }

    fn read_level(&self, pin: EffectivePin) -> Option<PinLevel> {
        self.reader
            .digital_read(pin)
            .inspect_err(|e| debug!("Level of {:?} unknown: {}", pin, e))
            .ok()
    }
}
