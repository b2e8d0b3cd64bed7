//! World-mutation primitives: the host-side actions the rebellion engine
//! drives (hero and clan creation, war, ownership transfer, relations).
//!
//! Each primitive enforces its own invariants with `assert!`, so a bad id or
//! an impossible transition fails loudly at the call site.

use tracing::debug;

use super::clan::Clan;
use super::diplomacy::{War, WarCause};
use super::hero::{Hero, MAX_RELATION, MIN_RELATION};
use super::kingdom::{Kingdom, MapFaction};
use super::party::MobileParty;
use super::troop::TroopRoster;
use super::world::CampaignWorld;

impl CampaignWorld {
    // -- Heroes --

    /// Create an inactive hero from a character template, born at `settlement_id`.
    /// The hero takes the template's culture and starting perks.
    pub fn create_special_hero(
        &mut self,
        template_id: u64,
        settlement_id: u64,
        name: String,
        age: u32,
    ) -> u64 {
        assert!(
            self.settlements.contains_key(&settlement_id),
            "create_special_hero: settlement {settlement_id} not found"
        );
        let template = self
            .hero_templates
            .get(&template_id)
            .unwrap_or_else(|| panic!("create_special_hero: template {template_id} not found"));
        let id = self.id_gen.next_id();
        let mut hero = Hero::new(id, name, template.culture, age);
        hero.born_at = Some(settlement_id);
        hero.template = Some(template_id);
        hero.perks = template.perks.clone();
        self.heroes.insert(id, hero);
        id
    }

    pub fn change_hero_gold(&mut self, hero_id: u64, amount: i64) {
        self.hero_mut(hero_id).gold += amount;
    }

    /// Add `delta` to the relation between two heroes, on both sides.
    pub fn change_relation(&mut self, a: u64, b: u64, delta: i32) {
        let current = self.hero(a).relation_with(b);
        self.set_personal_relation(a, b, current + delta);
    }

    /// Overwrite the relation between two heroes, on both sides.
    /// Values are clamped to the relation bounds.
    pub fn set_personal_relation(&mut self, a: u64, b: u64, value: i32) {
        assert!(a != b, "set_personal_relation: hero {a} related to itself");
        assert!(
            self.heroes.contains_key(&b),
            "set_personal_relation: hero {b} not found"
        );
        let value = value.clamp(MIN_RELATION, MAX_RELATION);
        self.hero_mut(a).relations.insert(b, value);
        self.hero_mut(b).relations.insert(a, value);
    }

    // -- Clans --

    /// Create a rebel clan seated at a settlement and led by `leader_id`.
    ///
    /// The clan is named after its home settlement and takes its culture.
    pub fn create_settlement_rebel_clan(
        &mut self,
        settlement_id: u64,
        leader_id: u64,
        banner_icon: Option<u32>,
    ) -> u64 {
        let settlement = self.settlement(settlement_id);
        let name = format!("{} rebels", settlement.name);
        let culture = settlement.culture;
        assert!(
            self.hero(leader_id).clan.is_none(),
            "create_settlement_rebel_clan: hero {leader_id} already has a clan"
        );

        let id = self.id_gen.next_id();
        let mut clan = Clan::new(id, name, culture);
        clan.is_rebel = true;
        clan.home_settlement = Some(settlement_id);
        clan.banner_icon = banner_icon;
        self.clans.insert(id, clan);
        self.add_hero_to_clan(leader_id, id);
        self.clan_mut(id).leader = Some(leader_id);
        id
    }

    pub fn add_hero_to_clan(&mut self, hero_id: u64, clan_id: u64) {
        assert!(
            self.clans.contains_key(&clan_id),
            "add_hero_to_clan: clan {clan_id} not found"
        );
        let previous = self.hero_mut(hero_id).clan.replace(clan_id);
        if let Some(old) = previous.and_then(|id| self.clans.get_mut(&id)) {
            old.members.remove(&hero_id);
        }
        self.clan_mut(clan_id).members.insert(hero_id);
    }

    /// Mark a clan eliminated. The host announces it with `ClanDestroyed`.
    pub fn eliminate_clan(&mut self, clan_id: u64) {
        let clan = self.clan_mut(clan_id);
        assert!(!clan.is_eliminated, "eliminate_clan: clan {clan_id} already eliminated");
        clan.is_eliminated = true;
        let faction = MapFaction::Clan(clan_id);
        self.wars.retain(|w| !w.involves(faction));
    }

    // -- Kingdoms --

    /// Found a kingdom ruled by `ruling_clan`. The clan's wars become the
    /// kingdom's wars.
    pub fn create_kingdom(
        &mut self,
        name: String,
        informal_name: String,
        culture: u64,
        ruling_clan: u64,
    ) -> u64 {
        assert!(
            self.clan(ruling_clan).kingdom.is_none(),
            "create_kingdom: clan {ruling_clan} already belongs to a kingdom"
        );
        let id = self.id_gen.next_id();
        self.kingdoms.insert(
            id,
            Kingdom {
                id,
                name,
                informal_name,
                culture,
                ruling_clan,
                is_eliminated: false,
            },
        );
        self.clan_mut(ruling_clan).kingdom = Some(id);

        let from = MapFaction::Clan(ruling_clan);
        let to = MapFaction::Kingdom(id);
        for war in self.wars.iter_mut().filter(|w| w.involves(from)) {
            war.transfer_side(from, to);
        }
        id
    }

    // -- Diplomacy --

    pub fn declare_war(&mut self, x: MapFaction, y: MapFaction, cause: WarCause) {
        assert!(x != y, "declare_war: {x:?} cannot declare war on itself");
        assert!(!self.is_at_war(x, y), "declare_war: {x:?} and {y:?} already at war");
        debug!(attacker = ?x, defender = ?y, ?cause, "war declared");
        self.wars.push(War { a: x, b: y, cause });
    }

    // -- Settlements --

    /// Hand a settlement and its bound villages to `hero_id`'s clan after a
    /// successful rebellion. The previous governor is dismissed.
    pub fn change_owner_by_rebellion(&mut self, hero_id: u64, settlement_id: u64) {
        let new_owner = self
            .hero(hero_id)
            .clan
            .unwrap_or_else(|| panic!("change_owner_by_rebellion: hero {hero_id} has no clan"));
        let mut transferred = self.bound_villages(settlement_id);
        transferred.push(settlement_id);
        for id in transferred {
            let settlement = self.settlement_mut(id);
            settlement.owner_clan = new_owner;
            settlement.governor = None;
        }
    }

    pub fn change_governor(&mut self, settlement_id: u64, hero_id: u64) {
        assert!(
            self.heroes.contains_key(&hero_id),
            "change_governor: hero {hero_id} not found"
        );
        self.settlement_mut(settlement_id).governor = Some(hero_id);
    }

    // -- Parties --

    /// Spawn a lord party led by `hero_id`, standing inside `settlement_id`.
    pub fn spawn_lord_party(&mut self, hero_id: u64, settlement_id: u64) -> u64 {
        assert!(
            self.settlements.contains_key(&settlement_id),
            "spawn_lord_party: settlement {settlement_id} not found"
        );
        let hero = self.hero(hero_id);
        let clan = hero
            .clan
            .unwrap_or_else(|| panic!("spawn_lord_party: hero {hero_id} has no clan"));
        let name = format!("{}'s party", hero.name);
        let id = self.id_gen.next_id();
        self.parties.insert(
            id,
            MobileParty {
                id,
                name,
                leader: Some(hero_id),
                clan,
                is_lord_party: true,
                current_settlement: Some(settlement_id),
                members: TroopRoster::new(),
                ai_disabled_until: None,
            },
        );
        id
    }

    pub fn enter_settlement(&mut self, party_id: u64, settlement_id: u64) {
        assert!(
            self.settlements.contains_key(&settlement_id),
            "enter_settlement: settlement {settlement_id} not found"
        );
        self.party_mut(party_id).current_settlement = Some(settlement_id);
    }

    pub fn destroy_party(&mut self, party_id: u64) {
        assert!(
            self.parties.remove(&party_id).is_some(),
            "destroy_party: party {party_id} not found"
        );
        for settlement in self.settlements.values_mut() {
            if settlement.militia_party == Some(party_id) {
                settlement.militia_party = None;
            }
        }
    }
}
