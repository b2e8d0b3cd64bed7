use std::collections::BTreeMap;

use rand::RngCore;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{CampaignWorld, Culture};

/// Per-culture banner icon usage counts.
///
/// New clans get the least-used icon from their culture's pool so that
/// banners repeat as rarely as possible. Counts only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconFrequencyTable {
    counts: BTreeMap<u64, BTreeMap<u32, u32>>,
}

impl IconFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure every kingdom culture and every catalog culture has a table,
    /// and that every icon in a culture's pool is counted (zero if unseen).
    /// Safe to call repeatedly.
    pub fn reconcile(&mut self, world: &CampaignWorld) {
        for kingdom in world.kingdoms.values() {
            self.counts.entry(kingdom.culture).or_default();
        }
        for culture in world.cultures.keys() {
            self.counts.entry(*culture).or_default();
        }
        for (culture_id, table) in self.counts.iter_mut() {
            let Some(pool) = world
                .cultures
                .get(culture_id)
                .and_then(|c| c.banner_icon_ids.as_ref())
            else {
                continue;
            };
            for &icon in pool {
                table.entry(icon).or_insert(0);
            }
        }
    }

    /// Pick a banner icon for a new clan of `culture` and count its use.
    ///
    /// Draws from the culture's own pool in random order, taking the first
    /// icon with the strictly lowest count. A culture without a pool borrows
    /// the least-used icon known for any culture. Returns `None` (and records
    /// nothing) when no icon is known at all.
    pub fn allocate(&mut self, culture: &Culture, rng: &mut dyn RngCore) -> Option<u32> {
        let mut best: Option<(u32, u32)> = None;

        if let Some(pool) = culture.icon_pool() {
            let table = self.counts.entry(culture.id).or_default();
            let mut shuffled = pool.to_vec();
            shuffled.shuffle(rng);
            for icon in shuffled {
                let count = *table.entry(icon).or_insert(0);
                if best.is_none_or(|(_, lowest)| count < lowest) {
                    best = Some((icon, count));
                }
            }
        }

        if best.is_none() {
            for table in self.counts.values() {
                for (&icon, &count) in table {
                    if best.is_none_or(|(_, lowest)| count < lowest) {
                        best = Some((icon, count));
                    }
                }
            }
        }

        let (icon, _) = best?;
        let uses = self
            .counts
            .entry(culture.id)
            .or_default()
            .entry(icon)
            .or_insert(0);
        *uses += 1;
        debug!(culture = culture.id, icon, uses = *uses, "allocated banner icon");
        Some(icon)
    }

    pub fn count(&self, culture: u64, icon: u32) -> Option<u32> {
        self.counts.get(&culture)?.get(&icon).copied()
    }

    pub fn culture_table(&self, culture: u64) -> Option<&BTreeMap<u32, u32>> {
        self.counts.get(&culture)
    }

    pub fn contains_culture(&self, culture: u64) -> bool {
        self.counts.contains_key(&culture)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
