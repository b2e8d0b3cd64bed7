use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::rebellion::legacy::{GameVersion, VersionParseError};
use crate::sim::rebellion::loyalty::LoyaltyThresholds;

pub const BUILTIN_REBELLION_CONFIG: &str = include_str!("data/rebellion_config.json");

/// Tuning for the rebellion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebellionConfig {
    /// Master switch for the uprising path. Loyalty recovery and maturation
    /// of existing rebel clans keep running when this is off.
    pub rebellion_enabled: bool,
    /// Daily chance that an eligible town rolls the uprising check.
    pub trigger_chance: f64,
    /// Militia must reach this multiple of the defenders' strength.
    pub militia_advantage_ratio: f64,
    pub loyalty: LoyaltyThresholds,
    /// Saves older than this version get their stale rebellious flags cleared
    /// when the host updates the game version.
    pub legacy_migration_cutoff: String,
}

impl Default for RebellionConfig {
    fn default() -> Self {
        Self {
            rebellion_enabled: true,
            trigger_chance: 0.5,
            militia_advantage_ratio: 1.4,
            loyalty: LoyaltyThresholds::default(),
            legacy_migration_cutoff: "e1.7.3.0".to_string(),
        }
    }
}

impl RebellionConfig {
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_REBELLION_CONFIG)
            .expect("builtin rebellion config should parse")
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RebellionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn migration_cutoff(&self) -> Result<GameVersion, VersionParseError> {
        self.legacy_migration_cutoff.parse()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.trigger_chance) {
            return Err(ConfigError::OutOfRange {
                field: "trigger_chance",
                value: self.trigger_chance,
            });
        }
        if self.militia_advantage_ratio < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "militia_advantage_ratio",
                value: self.militia_advantage_ratio,
            });
        }
        if self.loyalty.loyalty_boost_after_rebellion < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "loyalty.loyalty_boost_after_rebellion",
                value: self.loyalty.loyalty_boost_after_rebellion,
            });
        }
        self.migration_cutoff()?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse rebellion config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read rebellion config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("invalid legacy migration cutoff: {0}")]
    Cutoff(#[from] VersionParseError),
}
