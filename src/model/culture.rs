use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A culture from the object catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Culture {
    pub id: u64,
    pub name: String,
    /// Tier-1 troop recruited by this culture.
    pub basic_troop: u64,
    /// Ranged militia troop that garrisons a town after an uprising.
    pub ranged_militia_troop: u64,
    /// Templates heroes are drawn from when one of this culture's towns rises up.
    pub rebellious_hero_templates: Vec<u64>,
    /// Banner icons a new clan of this culture may carry.
    ///
    /// `None` means the culture has no pool at all (treated like an empty pool).
    pub banner_icon_ids: Option<Vec<u32>>,
}

impl Culture {
    /// The eligible icon pool, `None` when absent or empty.
    pub fn icon_pool(&self) -> Option<&[u32]> {
        self.banner_icon_ids
            .as_deref()
            .filter(|pool| !pool.is_empty())
    }
}

/// Character template used to create rebel heroes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroTemplate {
    pub id: u64,
    pub name: String,
    pub culture: u64,
    /// Perks the template hands to every hero created from it.
    pub perks: BTreeSet<u64>,
}
