//! Per-board report layouts.
//!
//! A board with a pin header is walked one header row (two physical pins) at
//! a time. A board without one (the compute module) is walked over its flat
//! virtual index space instead, one pin per row.

use crate::board::{read_board_name, BoardInfo, BoardModel, OrangePiVariant};
use crate::config::ReportConfig;
use crate::consts::{self, header};
use crate::error::{Error, Result};
use crate::gpio::PhysicalPin;
use log::debug;

/// How a detected board is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardLayout {
    /// Two-column physical header, rendered as pin pairs.
    Header(HeaderLayout),
    /// No header; one row per mapped virtual index.
    Flat(FlatLayout),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Text embedded in the top and bottom borders.
    pub title: String,
    /// Heading of the SoC GPIO number columns.
    pub gpio_label: &'static str,
    /// Header ranges, rendered in order with a separator between them.
    pub sections: Vec<PinSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatLayout {
    /// Virtual indices `0..max_index` are walked.
    pub max_index: u32,
}

/// A contiguous run of physical pins starting on a left (odd) column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSection {
    first: u8,
    last: u8,
}

impl PinSection {
    pub fn new(first: u8, last: u8) -> Result<Self> {
        let first_pin = PhysicalPin::new(first)?;
        PhysicalPin::new(last)?;
        if !first_pin.is_left_column() || last <= first {
            return Err(Error::ArgumentOutOfRange(format!(
                "Pin section {}-{} must start on an odd pin and span at least one row",
                first, last
            )));
        }
        Ok(PinSection { first, last })
    }

    pub fn first(&self) -> u8 {
        self.first
    }

    pub fn last(&self) -> u8 {
        self.last
    }

    /// Left-column pins of each row. The right pin of a row is never past `last`.
    pub fn rows(&self) -> impl Iterator<Item = PhysicalPin> {
        (self.first..self.last).step_by(2).map(PhysicalPin)
    }

    pub fn row_count(&self) -> usize {
        usize::from((self.last - self.first + 1) / 2)
    }
}

impl HeaderLayout {
    fn new(title: impl Into<String>, gpio_label: &'static str, sections: Vec<PinSection>) -> Self {
        HeaderLayout {
            title: title.into(),
            gpio_label,
            sections,
        }
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(PinSection::row_count).sum()
    }
}

impl BoardLayout {
    /// Chooses the layout for the identified board.
    ///
    /// Fails with [`Error::UnknownBoardModel`] for a model code outside the
    /// known set, and with [`Error::VariantNotConfigured`] for an Orange Pi
    /// when neither `config` nor the build configuration names a variant.
    pub fn select(info: &BoardInfo, config: &ReportConfig) -> Result<Self> {
        let model = BoardModel::try_from(info.model)?;
        let layout = match model {
            BoardModel::ModelA | BoardModel::ModelB => {
                let rev2 = info.revision == consts::revision::VERSION_2;
                let title = match (model, rev2) {
                    (BoardModel::ModelA, _) => "Model  A",
                    (_, true) => "Model B2",
                    (_, false) => "Model B1",
                };
                let mut sections = vec![PinSection::new(1, header::SHORT)?];
                if rev2 {
                    sections.push(PinSection::new(header::P5_FIRST, header::P5_LAST)?);
                }
                BoardLayout::Header(HeaderLayout::new(title, "BCM", sections))
            }
            BoardModel::ModelBPlus => BoardLayout::Header(HeaderLayout::new(
                "B Plus",
                "BCM",
                vec![PinSection::new(1, header::LONG)?],
            )),
            BoardModel::BananaPro => BoardLayout::Header(HeaderLayout::new(
                "Banana Pro",
                "BCM",
                vec![PinSection::new(1, header::LONG)?],
            )),
            BoardModel::ComputeModule => BoardLayout::Flat(FlatLayout {
                max_index: consts::FLAT_MAX_INDEX,
            }),
            BoardModel::OrangePi => {
                let variant = config
                    .resolve_orange_pi_variant()?
                    .ok_or(Error::VariantNotConfigured)?;
                let name = read_board_name(&config.model_path);
                BoardLayout::Header(HeaderLayout::new(
                    format!(" {} ", name),
                    "GPIO",
                    orange_pi_sections(variant)?,
                ))
            }
        };
        debug!("Selected layout for {:?} rev {}: {:?}", model, info.revision, layout);
        Ok(layout)
    }
}

fn orange_pi_sections(variant: OrangePiVariant) -> Result<Vec<PinSection>> {
    use OrangePiVariant::*;

    let main = match variant {
        H3 | Rk3399 | Pi4 | Pc2 | Prime | Win => header::LONG,
        Zero | R1 | Lite2 | ZeroPlus2H3 | Pi3 | ZeroPlus | ZeroPlus2H5 | Pi800 => header::SHORT,
        R1Plus => 13,
        Zero2 => 34,
    };
    let mut sections = vec![PinSection::new(1, main)?];
    if variant == Zero {
        sections.push(PinSection::new(27, 28)?);
    }
    Ok(sections)
}
