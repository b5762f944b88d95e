//! Board identification types.

use crate::consts;
use crate::error::{Error, Result};
use log::{debug, trace};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Raw board identification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardInfo {
    /// Model code; see [`BoardModel`] for the recognized ones.
    pub model: u32,
    pub revision: u32,
    pub memory_mb: u32,
    pub maker: u32,
    pub over_volted: bool,
}

/// Source of the detected board.
pub trait BoardIdentifier {
    fn identify(&self) -> BoardInfo;
}

/// A board that has already been identified.
impl BoardIdentifier for BoardInfo {
    fn identify(&self) -> BoardInfo {
        *self
    }
}

/// Board families this crate knows how to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardModel {
    ModelA,
    ModelB,
    ModelBPlus,
    ComputeModule,
    BananaPro,
    OrangePi,
}

impl TryFrom<u32> for BoardModel {
    type Error = Error;

    fn try_from(model: u32) -> Result<Self> {
        match model {
            consts::model::MODEL_A => Ok(BoardModel::ModelA),
            consts::model::MODEL_B => Ok(BoardModel::ModelB),
            consts::model::MODEL_B_PLUS => Ok(BoardModel::ModelBPlus),
            consts::model::COMPUTE_MODULE => Ok(BoardModel::ComputeModule),
            consts::model::BANANA_PRO => Ok(BoardModel::BananaPro),
            consts::model::ORANGE_PI => Ok(BoardModel::OrangePi),
            _ => Err(Error::UnknownBoardModel { model }),
        }
    }
}

impl BoardModel {
    /// The raw identification code for this model.
    pub fn code(&self) -> u32 {
        match self {
            BoardModel::ModelA => consts::model::MODEL_A,
            BoardModel::ModelB => consts::model::MODEL_B,
            BoardModel::ModelBPlus => consts::model::MODEL_B_PLUS,
            BoardModel::ComputeModule => consts::model::COMPUTE_MODULE,
            BoardModel::BananaPro => consts::model::BANANA_PRO,
            BoardModel::OrangePi => consts::model::ORANGE_PI,
        }
    }
}

/// Hardware sub-variants of the Orange Pi family.
///
/// These share one report layout but differ in header length, so the
/// variant has to be configured explicitly; there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrangePiVariant {
    H3,
    Rk3399,
    Pi4,
    Pc2,
    Prime,
    Win,
    Zero,
    R1,
    Lite2,
    ZeroPlus2H3,
    Pi3,
    ZeroPlus,
    ZeroPlus2H5,
    Pi800,
    R1Plus,
    Zero2,
}

impl OrangePiVariant {
    pub const ALL: [OrangePiVariant; 16] = [
        OrangePiVariant::H3,
        OrangePiVariant::Rk3399,
        OrangePiVariant::Pi4,
        OrangePiVariant::Pc2,
        OrangePiVariant::Prime,
        OrangePiVariant::Win,
        OrangePiVariant::Zero,
        OrangePiVariant::R1,
        OrangePiVariant::Lite2,
        OrangePiVariant::ZeroPlus2H3,
        OrangePiVariant::Pi3,
        OrangePiVariant::ZeroPlus,
        OrangePiVariant::ZeroPlus2H5,
        OrangePiVariant::Pi800,
        OrangePiVariant::R1Plus,
        OrangePiVariant::Zero2,
    ];

    /// Short configuration name, accepted back by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            OrangePiVariant::H3 => "h3",
            OrangePiVariant::Rk3399 => "rk3399",
            OrangePiVariant::Pi4 => "4",
            OrangePiVariant::Pc2 => "pc2",
            OrangePiVariant::Prime => "prime",
            OrangePiVariant::Win => "win",
            OrangePiVariant::Zero => "zero",
            OrangePiVariant::R1 => "r1",
            OrangePiVariant::Lite2 => "lite2",
            OrangePiVariant::ZeroPlus2H3 => "zeroplus2_h3",
            OrangePiVariant::Pi3 => "3",
            OrangePiVariant::ZeroPlus => "zeroplus",
            OrangePiVariant::ZeroPlus2H5 => "zeroplus2_h5",
            OrangePiVariant::Pi800 => "800",
            OrangePiVariant::R1Plus => "r1plus",
            OrangePiVariant::Zero2 => "zero2",
        }
    }

    /// Variant named by the `GPIO_READALL_ORANGEPI_BOARD` value at build time.
    ///
    /// Returns `None` when the value was not set. An unrecognized name is an error.
    pub fn from_build_config() -> Result<Option<Self>> {
        match option_env!("GPIO_READALL_ORANGEPI_BOARD") {
            Some(name) => {
                debug!("{} = {:?}", consts::ORANGEPI_BOARD_ENV, name);
                name.parse().map(Some)
            }
            None => Ok(None),
        }
    }
}

impl FromStr for OrangePiVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let wanted = wanted.strip_prefix("orangepi_").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

/// Reads the device-tree board name shown in the Orange Pi banner.
///
/// The name is NUL-terminated in the device tree. A missing or unreadable
/// file gives an empty name.
pub fn read_board_name(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            let name = String::from_utf8_lossy(&bytes[..end]).trim_end().to_string();
            trace!("Board name from {}: {:?}", path.display(), name);
            name
        }
        Err(e) => {
            debug!("No board name at {}: {}", path.display(), e);
            String::new()
        }
    }
}
