use serde::{Deserialize, Serialize};

use super::troop::TroopRoster;

pub const MAX_LOYALTY: f64 = 100.0;
pub const MIN_LOYALTY: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementKind {
    Town,
    Castle,
    Village,
}

/// Soldiers stationed in a fortified settlement, plus the prisoners it holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Garrison {
    pub members: TroopRoster,
    pub prisoners: TroopRoster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: u64,
    pub name: String,
    pub kind: SettlementKind,
    pub culture: u64,
    pub owner_clan: u64,
    pub loyalty: f64,
    pub militia: f64,
    pub in_rebellious_state: bool,
    pub food_stocks: f64,
    pub food_capacity: f64,
    pub garrison: Option<Garrison>,
    pub governor: Option<u64>,
    pub militia_party: Option<u64>,
    /// Town or castle a village is bound to.
    pub bound_to: Option<u64>,
    pub in_battle: bool,
    pub under_siege: bool,
}

impl Settlement {
    pub fn new(id: u64, name: String, kind: SettlementKind, culture: u64, owner_clan: u64) -> Self {
        Self {
            id,
            name,
            kind,
            culture,
            owner_clan,
            loyalty: 50.0,
            militia: 0.0,
            in_rebellious_state: false,
            food_stocks: 0.0,
            food_capacity: 0.0,
            garrison: None,
            governor: None,
            militia_party: None,
            bound_to: None,
            in_battle: false,
            under_siege: false,
        }
    }

    pub fn is_town(&self) -> bool {
        self.kind == SettlementKind::Town
    }

    /// Towns and castles count as fiefs; villages do not.
    pub fn is_fief(&self) -> bool {
        matches!(self.kind, SettlementKind::Town | SettlementKind::Castle)
    }

    /// Add to loyalty, keeping it within 0–100.
    pub fn add_loyalty(&mut self, delta: f64) {
        self.loyalty = (self.loyalty + delta).clamp(MIN_LOYALTY, MAX_LOYALTY);
    }

    /// The garrison, created empty if the settlement has none.
    pub fn garrison_mut(&mut self) -> &mut Garrison {
        self.garrison.get_or_insert_with(Garrison::default)
    }
}
