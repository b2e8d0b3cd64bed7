//! Save-game version handling and the one-off fix-up applied when an old
//! save is loaded into a newer game version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::model::CampaignWorld;
use crate::sim::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStage {
    Alpha,
    Beta,
    EarlyAccess,
    Release,
    Development,
}

impl ReleaseStage {
    fn prefix(self) -> char {
        match self {
            ReleaseStage::Alpha => 'a',
            ReleaseStage::Beta => 'b',
            ReleaseStage::EarlyAccess => 'e',
            ReleaseStage::Release => 'v',
            ReleaseStage::Development => 'd',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'a' => Some(ReleaseStage::Alpha),
            'b' => Some(ReleaseStage::Beta),
            'e' => Some(ReleaseStage::EarlyAccess),
            'v' => Some(ReleaseStage::Release),
            'd' => Some(ReleaseStage::Development),
            _ => None,
        }
    }
}

/// A game version such as `e1.7.3.0`. Ordered by stage, then numerically
/// component by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameVersion {
    pub stage: ReleaseStage,
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
    pub change_set: u32,
}

impl GameVersion {
    pub fn new(stage: ReleaseStage, major: u32, minor: u32, revision: u32, change_set: u32) -> Self {
        Self {
            stage,
            major,
            minor,
            revision,
            change_set,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,
    #[error("unknown release stage prefix {0:?}")]
    UnknownStage(char),
    #[error("version {0:?} has no numeric components")]
    MissingComponents(String),
    #[error("version {version:?} has {count} components, expected at most 4")]
    TooManyComponents { version: String, count: usize },
    #[error("invalid version component {component:?} in {version:?}")]
    InvalidComponent { version: String, component: String },
}

impl FromStr for GameVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let first = chars.next().ok_or(VersionParseError::Empty)?;
        let stage = ReleaseStage::from_prefix(first).ok_or(VersionParseError::UnknownStage(first))?;
        let rest = chars.as_str();
        if rest.is_empty() {
            return Err(VersionParseError::MissingComponents(s.to_string()));
        }

        let parts: Vec<&str> = rest.split('.').collect();
        if parts.len() > 4 {
            return Err(VersionParseError::TooManyComponents {
                version: s.to_string(),
                count: parts.len(),
            });
        }
        let mut numbers = [0u32; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent {
                    version: s.to_string(),
                    component: part.to_string(),
                })?;
        }
        let [major, minor, revision, change_set] = numbers;
        Ok(GameVersion::new(stage, major, minor, revision, change_set))
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}.{}",
            self.stage.prefix(),
            self.major,
            self.minor,
            self.revision,
            self.change_set
        )
    }
}

/// What the host knows about the save being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadInfo {
    /// The save was written by a different game version than the running one.
    pub updating_game_version: bool,
    pub last_loaded_version: Option<GameVersion>,
}

impl LoadInfo {
    /// True when loading a save older than `cutoff` into a newer game.
    pub fn needs_migration(&self, cutoff: GameVersion) -> bool {
        self.updating_game_version && self.last_loaded_version.is_some_and(|v| v < cutoff)
    }
}

/// Older saves could leave castles and villages flagged as rebellious. Clear
/// the flag on every non-town settlement and announce each change.
/// Returns how many settlements were fixed.
pub fn clear_stale_rebellious_flags(world: &mut CampaignWorld, signals: &mut Vec<Signal>) -> usize {
    let mut fixed = 0;
    for settlement in world.settlements.values_mut() {
        if !settlement.is_town() && settlement.in_rebellious_state {
            settlement.in_rebellious_state = false;
            signals.push(Signal::RebelliousStateChanged {
                settlement_id: settlement.id,
                rebellious: false,
            });
            fixed += 1;
        }
    }
    if fixed > 0 {
        info!(fixed, "cleared stale rebellious flags from legacy save");
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_orders_versions() {
        let cutoff: GameVersion = "e1.7.3.0".parse().unwrap();
        let older: GameVersion = "e1.7.2.1".parse().unwrap();
        let newer: GameVersion = "e1.10.0".parse().unwrap();
        assert!(older < cutoff);
        assert!(newer > cutoff);
        assert_eq!(newer.change_set, 0);
        assert_eq!(cutoff.to_string(), "e1.7.3.0");
    }

    #[test]
    fn release_stage_outranks_numbers() {
        let beta: GameVersion = "b9.9.9.9".parse().unwrap();
        let early: GameVersion = "e1.0.0.0".parse().unwrap();
        assert!(beta < early);
    }

    #[test]
    fn rejects_malformed_versions() {
        assert_eq!("".parse::<GameVersion>(), Err(VersionParseError::Empty));
        assert_eq!(
            "x1.2".parse::<GameVersion>(),
            Err(VersionParseError::UnknownStage('x'))
        );
        assert!(matches!(
            "e1.2.x".parse::<GameVersion>(),
            Err(VersionParseError::InvalidComponent { .. })
        ));
        assert!(matches!(
            "e1.2.3.4.5".parse::<GameVersion>(),
            Err(VersionParseError::TooManyComponents { count: 5, .. })
        ));
    }

    #[test]
    fn migration_requires_version_update() {
        let cutoff: GameVersion = "e1.7.3.0".parse().unwrap();
        let old = Some("e1.6.0.0".parse().unwrap());
        assert!(!LoadInfo { updating_game_version: false, last_loaded_version: old }.needs_migration(cutoff));
        assert!(LoadInfo { updating_game_version: true, last_loaded_version: old }.needs_migration(cutoff));
        assert!(!LoadInfo { updating_game_version: true, last_loaded_version: Some(cutoff) }.needs_migration(cutoff));
        assert!(!LoadInfo { updating_game_version: true, last_loaded_version: None }.needs_migration(cutoff));
    }
}
