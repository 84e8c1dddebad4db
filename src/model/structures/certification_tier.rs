use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::model::config::EngineConfig;

/// Tournament certification tier. Discriminants index into the configured
/// booster table, which validation keeps non-decreasing from 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[repr(usize)]
pub enum CertificationTier {
    Open = 0,
    Certified = 1,
    Major = 2,
    Championship = 3
}

impl CertificationTier {
    pub fn booster(&self, config: &EngineConfig) -> f64 {
        config.certification.boosters[*self as usize]
    }
}
