//! Report configuration.

use crate::board::OrangePiVariant;
use crate::consts;
use crate::error::Result;
use crate::gpio::NumberingMode;
use std::path::PathBuf;

/// Settings for one report, fixed for its whole duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Scheme used to address pins when querying mode and level.
    pub numbering: NumberingMode,
    /// Orange Pi sub-variant. Required when an Orange Pi is detected.
    pub orange_pi_variant: Option<OrangePiVariant>,
    /// File holding the device-tree board name for the Orange Pi banner.
    pub model_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            numbering: NumberingMode::default(),
            orange_pi_variant: None,
            model_path: PathBuf::from(consts::DEFAULT_MODEL_PATH),
        }
    }
}

impl ReportConfig {
    pub fn with_numbering(mut self, numbering: NumberingMode) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn with_orange_pi_variant(mut self, variant: OrangePiVariant) -> Self {
        self.orange_pi_variant = Some(variant);
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// The configured Orange Pi variant, else the one named at build time.
    pub fn resolve_orange_pi_variant(&self) -> Result<Option<OrangePiVariant>> {
        match self.orange_pi_variant {
            Some(variant) => Ok(Some(variant)),
            None => OrangePiVariant::from_build_config(),
        }
    }
}
