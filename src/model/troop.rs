use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A recruitable troop type from the object catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TroopType {
    pub id: u64,
    pub name: String,
    pub culture: u64,
    pub tier: u8,
    /// Combat strength contributed by one soldier of this type.
    pub strength: f64,
    /// Troop types this one can be upgraded into.
    pub upgrade_targets: Vec<u64>,
}

/// Head counts per troop type.
///
/// Zero-count entries are never stored, so `is_empty` means "no soldiers".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroopRoster {
    counts: BTreeMap<u64, u32>,
}

impl TroopRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, troop: u64, count: u32) {
        if count == 0 {
            return;
        }
        *self.counts.entry(troop).or_insert(0) += count;
    }

    pub fn count_of(&self, troop: u64) -> u32 {
        self.counts.get(&troop).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Iterate `(troop_id, count)` in ascending troop id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.counts.iter().map(|(&id, &n)| (id, n))
    }

    /// Sum of per-soldier strength across the roster.
    ///
    /// Troop ids missing from `catalog` contribute nothing.
    pub fn strength(&self, catalog: &BTreeMap<u64, TroopType>) -> f64 {
        self.iter()
            .map(|(id, n)| catalog.get(&id).map_or(0.0, |t| t.strength * n as f64))
            .sum()
    }
}
