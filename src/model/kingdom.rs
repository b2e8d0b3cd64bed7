use serde::{Deserialize, Serialize};

/// A sovereign political entity ruled by one clan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kingdom {
    pub id: u64,
    pub name: String,
    pub informal_name: String,
    pub culture: u64,
    pub ruling_clan: u64,
    pub is_eliminated: bool,
}

/// The faction a settlement or party answers to on the map: the clan's
/// kingdom when it has one, otherwise the clan itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum MapFaction {
    Clan(u64),
    Kingdom(u64),
}

impl MapFaction {
    pub fn id(self) -> u64 {
        match self {
            MapFaction::Clan(id) | MapFaction::Kingdom(id) => id,
        }
    }
}
