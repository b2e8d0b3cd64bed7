use serde::{Deserialize, Serialize};

use super::kingdom::MapFaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarCause {
    Default,
    /// Declared by a settlement's rebels against its former rulers.
    Rebellion,
}

/// An active war between two map factions. Wars are unordered pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct War {
    pub a: MapFaction,
    pub b: MapFaction,
    pub cause: WarCause,
}

impl War {
    pub fn involves(&self, faction: MapFaction) -> bool {
        self.a == faction || self.b == faction
    }

    pub fn is_between(&self, x: MapFaction, y: MapFaction) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// Replace `from` with `to` on whichever side it appears.
    pub fn transfer_side(&mut self, from: MapFaction, to: MapFaction) {
        if self.a == from {
            self.a = to;
        }
        if self.b == from {
            self.b = to;
        }
    }
}
