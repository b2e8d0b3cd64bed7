mod actions;
pub mod clan;
pub mod culture;
pub mod diplomacy;
pub mod hero;
pub mod kingdom;
pub mod party;
pub mod settlement;
pub mod timestamp;
pub mod troop;
pub mod world;

pub use clan::Clan;
pub use culture::{Culture, HeroTemplate};
pub use diplomacy::{War, WarCause};
pub use hero::{Hero, HeroState, Perk, Skill};
pub use kingdom::{Kingdom, MapFaction};
pub use party::MobileParty;
pub use settlement::{Garrison, Settlement, SettlementKind};
pub use timestamp::SimTimestamp;
pub use troop::{TroopRoster, TroopType};
pub use world::CampaignWorld;
