use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clan {
    pub id: u64,
    pub name: String,
    pub informal_name: String,
    pub culture: u64,
    pub renown: f64,
    /// Rebel clans are spawned by uprisings and have not matured yet.
    pub is_rebel: bool,
    pub is_noble: bool,
    pub leader: Option<u64>,
    pub members: BTreeSet<u64>,
    pub kingdom: Option<u64>,
    pub home_settlement: Option<u64>,
    pub banner_icon: Option<u32>,
    pub is_eliminated: bool,
}

impl Clan {
    pub fn new(id: u64, name: String, culture: u64) -> Self {
        Self {
            id,
            informal_name: name.clone(),
            name,
            culture,
            renown: 0.0,
            is_rebel: false,
            is_noble: false,
            leader: None,
            members: BTreeSet::new(),
            kingdom: None,
            home_settlement: None,
            banner_icon: None,
            is_eliminated: false,
        }
    }

    pub fn add_renown(&mut self, amount: f64) {
        self.renown += amount;
    }

    pub fn change_name(&mut self, name: String, informal_name: String) {
        self.name = name;
        self.informal_name = informal_name;
    }
}
