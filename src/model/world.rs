use std::collections::BTreeMap;

use super::clan::Clan;
use super::culture::{Culture, HeroTemplate};
use super::diplomacy::War;
use super::hero::{Hero, Perk};
use super::kingdom::{Kingdom, MapFaction};
use super::party::MobileParty;
use super::settlement::{Settlement, SettlementKind};
use super::timestamp::SimTimestamp;
use super::troop::TroopType;
use crate::id::IdGenerator;

/// In-memory campaign state: the objects the rebellion engine reads and the
/// host-side primitives it mutates them through (see `actions`).
///
/// Lookups by id panic when the id is unknown. A dangling id is a logic bug
/// in the caller, not a recoverable condition.
#[derive(Debug, Clone)]
pub struct CampaignWorld {
    pub settlements: BTreeMap<u64, Settlement>,
    pub clans: BTreeMap<u64, Clan>,
    pub kingdoms: BTreeMap<u64, Kingdom>,
    pub heroes: BTreeMap<u64, Hero>,
    pub parties: BTreeMap<u64, MobileParty>,
    pub wars: Vec<War>,

    // -- Object catalog --
    pub cultures: BTreeMap<u64, Culture>,
    pub troops: BTreeMap<u64, TroopType>,
    pub perks: BTreeMap<u64, Perk>,
    pub hero_templates: BTreeMap<u64, HeroTemplate>,

    pub id_gen: IdGenerator,
    pub current_time: SimTimestamp,
    /// Settlement the player's party is currently inside.
    pub player_settlement: Option<u64>,
}

impl CampaignWorld {
    pub fn new() -> Self {
        Self {
            settlements: BTreeMap::new(),
            clans: BTreeMap::new(),
            kingdoms: BTreeMap::new(),
            heroes: BTreeMap::new(),
            parties: BTreeMap::new(),
            wars: Vec::new(),
            cultures: BTreeMap::new(),
            troops: BTreeMap::new(),
            perks: BTreeMap::new(),
            hero_templates: BTreeMap::new(),
            id_gen: IdGenerator::new(),
            current_time: SimTimestamp::default(),
            player_settlement: None,
        }
    }

    pub fn settlement(&self, id: u64) -> &Settlement {
        self.settlements
            .get(&id)
            .unwrap_or_else(|| panic!("settlement {id} not found"))
    }

    pub fn settlement_mut(&mut self, id: u64) -> &mut Settlement {
        self.settlements
            .get_mut(&id)
            .unwrap_or_else(|| panic!("settlement {id} not found"))
    }

    pub fn clan(&self, id: u64) -> &Clan {
        self.clans
            .get(&id)
            .unwrap_or_else(|| panic!("clan {id} not found"))
    }

    pub fn clan_mut(&mut self, id: u64) -> &mut Clan {
        self.clans
            .get_mut(&id)
            .unwrap_or_else(|| panic!("clan {id} not found"))
    }

    pub fn kingdom(&self, id: u64) -> &Kingdom {
        self.kingdoms
            .get(&id)
            .unwrap_or_else(|| panic!("kingdom {id} not found"))
    }

    pub fn hero(&self, id: u64) -> &Hero {
        self.heroes
            .get(&id)
            .unwrap_or_else(|| panic!("hero {id} not found"))
    }

    pub fn hero_mut(&mut self, id: u64) -> &mut Hero {
        self.heroes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("hero {id} not found"))
    }

    pub fn party(&self, id: u64) -> &MobileParty {
        self.parties
            .get(&id)
            .unwrap_or_else(|| panic!("party {id} not found"))
    }

    pub fn party_mut(&mut self, id: u64) -> &mut MobileParty {
        self.parties
            .get_mut(&id)
            .unwrap_or_else(|| panic!("party {id} not found"))
    }

    pub fn culture(&self, id: u64) -> &Culture {
        self.cultures
            .get(&id)
            .unwrap_or_else(|| panic!("culture {id} not found"))
    }

    // -- Factions --

    /// The clan's kingdom if it has one, otherwise the clan itself.
    pub fn map_faction_of_clan(&self, clan_id: u64) -> MapFaction {
        match self.clan(clan_id).kingdom {
            Some(kingdom) => MapFaction::Kingdom(kingdom),
            None => MapFaction::Clan(clan_id),
        }
    }

    pub fn settlement_map_faction(&self, settlement_id: u64) -> MapFaction {
        self.map_faction_of_clan(self.settlement(settlement_id).owner_clan)
    }

    /// The clan leader, or for a kingdom its ruling clan's leader.
    pub fn faction_leader(&self, faction: MapFaction) -> Option<u64> {
        match faction {
            MapFaction::Clan(id) => self.clan(id).leader,
            MapFaction::Kingdom(id) => self.clan(self.kingdom(id).ruling_clan).leader,
        }
    }

    pub fn faction_culture(&self, faction: MapFaction) -> u64 {
        match faction {
            MapFaction::Clan(id) => self.clan(id).culture,
            MapFaction::Kingdom(id) => self.kingdom(id).culture,
        }
    }

    pub fn faction_eliminated(&self, faction: MapFaction) -> bool {
        match faction {
            MapFaction::Clan(id) => self.clan(id).is_eliminated,
            MapFaction::Kingdom(id) => self.kingdom(id).is_eliminated,
        }
    }

    pub fn is_at_war(&self, x: MapFaction, y: MapFaction) -> bool {
        self.wars.iter().any(|w| w.is_between(x, y))
    }

    // -- Holdings --

    /// Every settlement owned by the clan, villages included.
    pub fn clan_settlements(&self, clan_id: u64) -> impl Iterator<Item = &Settlement> + '_ {
        self.settlements
            .values()
            .filter(move |s| s.owner_clan == clan_id)
    }

    /// Towns and castles held by the kingdom's clans.
    pub fn kingdom_fiefs(&self, kingdom_id: u64) -> impl Iterator<Item = &Settlement> + '_ {
        self.settlements.values().filter(move |s| {
            s.is_fief()
                && self
                    .clans
                    .get(&s.owner_clan)
                    .is_some_and(|c| c.kingdom == Some(kingdom_id))
        })
    }

    /// Fief count weighted by importance: towns count 2, castles 1.
    pub fn kingdom_weighted_fiefs(&self, kingdom_id: u64) -> i32 {
        self.kingdom_fiefs(kingdom_id)
            .map(|s| match s.kind {
                SettlementKind::Town => 2,
                _ => 1,
            })
            .sum()
    }

    /// Villages bound to the given town or castle.
    pub fn bound_villages(&self, settlement_id: u64) -> Vec<u64> {
        self.settlements
            .values()
            .filter(|s| s.kind == SettlementKind::Village && s.bound_to == Some(settlement_id))
            .map(|s| s.id)
            .collect()
    }

    // -- Parties --

    pub fn parties_in(&self, settlement_id: u64) -> impl Iterator<Item = &MobileParty> + '_ {
        self.parties
            .values()
            .filter(move |p| p.current_settlement == Some(settlement_id))
    }

    pub fn party_strength(&self, party_id: u64) -> f64 {
        self.party(party_id).members.strength(&self.troops)
    }

    pub fn garrison_strength(&self, settlement_id: u64) -> f64 {
        self.settlement(settlement_id)
            .garrison
            .as_ref()
            .map_or(0.0, |g| g.members.strength(&self.troops))
    }
}

impl Default for CampaignWorld {
    fn default() -> Self {
        Self::new()
    }
}
