use crate::model::*;
use crate::sim::{SimConfig, SimSystem, run};

/// IDs returned by [`Scenario::add_kingdom`].
pub struct KingdomIds {
    pub kingdom: u64,
    pub ruling_clan: u64,
    pub ruler: u64,
}

// -- Builder-style ref types --

/// Typed reference to a settlement in a [`Scenario`], enabling chained field mutation.
///
/// Created by [`Scenario::settlement_mut`].
/// Call [`.id()`](SettlementRef::id) to terminate the chain and extract the settlement ID.
pub struct SettlementRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl<'a> SettlementRef<'a> {
    fn data_mut(&mut self) -> &mut Settlement {
        self.scenario.world.settlement_mut(self.id)
    }

    pub fn loyalty(mut self, v: f64) -> Self { self.data_mut().loyalty = v; self }
    pub fn militia(mut self, v: f64) -> Self { self.data_mut().militia = v; self }
    pub fn owner(mut self, clan: u64) -> Self { self.data_mut().owner_clan = clan; self }
    pub fn governor(mut self, hero: u64) -> Self { self.data_mut().governor = Some(hero); self }
    pub fn under_siege(mut self, v: bool) -> Self { self.data_mut().under_siege = v; self }
    pub fn in_battle(mut self, v: bool) -> Self { self.data_mut().in_battle = v; self }
    pub fn rebellious(mut self, v: bool) -> Self { self.data_mut().in_rebellious_state = v; self }

    pub fn food(mut self, stocks: f64, capacity: f64) -> Self {
        let d = self.data_mut();
        d.food_stocks = stocks;
        d.food_capacity = capacity;
        self
    }

    /// Station `count` soldiers of `troop`, creating the garrison if needed.
    pub fn garrison(mut self, troop: u64, count: u32) -> Self {
        self.data_mut().garrison_mut().members.add(troop, count);
        self
    }

    /// Escape hatch: apply an arbitrary closure to the settlement.
    pub fn with(mut self, f: impl FnOnce(&mut Settlement)) -> Self { f(self.data_mut()); self }

    /// Terminate the chain and return the settlement ID.
    pub fn id(self) -> u64 { self.id }
}

/// Fluent builder for constructing campaign state.
///
/// Every `add_*` fills in the catalog objects a real campaign would already
/// have (troops, hero templates, clan leaders), so a test only spells out
/// what it actually cares about.
pub struct Scenario {
    world: CampaignWorld,
    start_year: u32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    /// Create a new scenario starting at year 1.
    pub fn new() -> Self {
        Self::at_year(1)
    }

    /// Create a new scenario starting at the given year.
    pub fn at_year(year: u32) -> Self {
        let mut world = CampaignWorld::new();
        world.current_time = SimTimestamp::from_year(year);
        Self {
            world,
            start_year: year,
        }
    }

    // -- Catalog --

    /// Add a troop type. `culture` is not checked, so troops can be created
    /// before the culture that recruits them.
    pub fn add_troop(&mut self, name: &str, culture: u64, strength: f64, upgrade_targets: &[u64]) -> u64 {
        let id = self.world.id_gen.next_id();
        self.world.troops.insert(
            id,
            TroopType {
                id,
                name: name.to_string(),
                culture,
                tier: if upgrade_targets.is_empty() { 2 } else { 1 },
                strength,
                upgrade_targets: upgrade_targets.to_vec(),
            },
        );
        id
    }

    pub fn add_perk(&mut self, name: &str, skill: Skill, required_skill_value: u32) -> u64 {
        let id = self.world.id_gen.next_id();
        self.world.perks.insert(
            id,
            Perk {
                id,
                name: name.to_string(),
                skill,
                required_skill_value,
            },
        );
        id
    }

    /// Add a hero template and register it as one of the culture's rebel templates.
    pub fn add_hero_template(&mut self, name: &str, culture: u64, perks: &[u64]) -> u64 {
        let id = self.world.id_gen.next_id();
        self.world.hero_templates.insert(
            id,
            HeroTemplate {
                id,
                name: name.to_string(),
                culture,
                perks: perks.iter().copied().collect(),
            },
        );
        self.culture_mut(culture).rebellious_hero_templates.push(id);
        id
    }

    /// Add a culture with a recruit line (basic troop upgrading to a veteran),
    /// a ranged militia troop, one rebel hero template, and icons 1 to 4.
    pub fn add_culture(&mut self, name: &str) -> u64 {
        self.add_culture_with(name, |_| {})
    }

    /// Add a culture, customizing it via closure after the defaults are in place.
    pub fn add_culture_with(&mut self, name: &str, modify: impl FnOnce(&mut Culture)) -> u64 {
        let id = self.world.id_gen.next_id();
        let veteran = self.add_troop(&format!("{name} Veteran"), id, 2.0, &[]);
        let basic = self.add_troop(&format!("{name} Recruit"), id, 1.0, &[veteran]);
        let ranged = self.add_troop(&format!("{name} Militia Archer"), id, 1.0, &[]);
        self.world.cultures.insert(
            id,
            Culture {
                id,
                name: name.to_string(),
                basic_troop: basic,
                ranged_militia_troop: ranged,
                rebellious_hero_templates: Vec::new(),
                banner_icon_ids: Some(vec![1, 2, 3, 4]),
            },
        );
        self.add_hero_template(&format!("{name} rebel"), id, &[]);
        modify(self.culture_mut(id));
        id
    }

    // -- Factions --

    /// Add a kingdom with a ruling clan and its leader. No settlements.
    pub fn add_kingdom(&mut self, name: &str, culture: u64) -> KingdomIds {
        let ruling_clan = self.add_clan(&format!("House of {name}"), culture);
        let ruler = self.leader_of(ruling_clan);
        let kingdom = self
            .world
            .create_kingdom(name.to_string(), name.to_string(), culture, ruling_clan);
        KingdomIds {
            kingdom,
            ruling_clan,
            ruler,
        }
    }

    /// Add an independent clan with a leader hero.
    pub fn add_clan(&mut self, name: &str, culture: u64) -> u64 {
        let id = self.world.id_gen.next_id();
        let mut clan = Clan::new(id, name.to_string(), culture);
        clan.is_noble = true;
        self.world.clans.insert(id, clan);
        let leader = self.add_hero(&format!("{name} elder"), culture, id);
        self.world.clan_mut(id).leader = Some(leader);
        id
    }

    /// Add a clan that is a vassal of `kingdom`.
    pub fn add_clan_in(&mut self, name: &str, culture: u64, kingdom: u64) -> u64 {
        let id = self.add_clan(name, culture);
        self.world.clan_mut(id).kingdom = Some(kingdom);
        id
    }

    /// Add an unmatured rebel clan seated at `home`. Ownership of `home` is
    /// left alone; chain [`SettlementRef::owner`] to hand it over.
    pub fn add_rebel_clan(&mut self, name: &str, culture: u64, home: u64) -> u64 {
        let id = self.add_clan(name, culture);
        let clan = self.world.clan_mut(id);
        clan.is_rebel = true;
        clan.home_settlement = Some(home);
        id
    }

    /// Add an active hero belonging to `clan`.
    pub fn add_hero(&mut self, name: &str, culture: u64, clan: u64) -> u64 {
        let id = self.world.id_gen.next_id();
        let mut hero = Hero::new(id, name.to_string(), culture, 40);
        hero.state = HeroState::Active;
        self.world.heroes.insert(id, hero);
        self.world.add_hero_to_clan(id, clan);
        id
    }

    // -- Settlements --

    pub fn add_town(&mut self, name: &str, culture: u64, owner: u64) -> u64 {
        self.add_settlement(name, SettlementKind::Town, culture, owner)
    }

    pub fn add_castle(&mut self, name: &str, culture: u64, owner: u64) -> u64 {
        self.add_settlement(name, SettlementKind::Castle, culture, owner)
    }

    pub fn add_village(&mut self, name: &str, culture: u64, owner: u64, bound_to: u64) -> u64 {
        let id = self.add_settlement(name, SettlementKind::Village, culture, owner);
        self.world.settlement_mut(id).bound_to = Some(bound_to);
        id
    }

    fn add_settlement(&mut self, name: &str, kind: SettlementKind, culture: u64, owner: u64) -> u64 {
        assert!(self.world.clans.contains_key(&owner), "clan {owner} not found");
        let id = self.world.id_gen.next_id();
        let settlement = Settlement::new(id, name.to_string(), kind, culture, owner);
        self.world.settlements.insert(id, settlement);
        id
    }

    // -- Parties --

    /// Add a lord party led by the clan leader, standing in `settlement`
    /// with `count` soldiers of `troop`.
    pub fn add_lord_party(&mut self, clan: u64, settlement: u64, troop: u64, count: u32) -> u64 {
        let leader = self.leader_of(clan);
        let id = self.world.spawn_lord_party(leader, settlement);
        self.world.party_mut(id).members.add(troop, count);
        id
    }

    /// Add the town's (empty) militia party.
    pub fn add_militia_party(&mut self, town: u64) -> u64 {
        let settlement = self.world.settlement(town);
        let name = format!("{} militia", settlement.name);
        let clan = settlement.owner_clan;
        let id = self.world.id_gen.next_id();
        self.world.parties.insert(
            id,
            MobileParty {
                id,
                name,
                leader: None,
                clan,
                is_lord_party: false,
                current_settlement: Some(town),
                members: TroopRoster::new(),
                ai_disabled_until: None,
            },
        );
        self.world.settlement_mut(town).militia_party = Some(id);
        id
    }

    // -- Mutation of existing objects --

    /// Return a builder ref for an existing settlement.
    pub fn settlement_mut(&mut self, id: u64) -> SettlementRef<'_> {
        assert!(
            self.world.settlements.contains_key(&id),
            "settlement {id} not found"
        );
        SettlementRef { scenario: self, id }
    }

    fn culture_mut(&mut self, id: u64) -> &mut Culture {
        self.world
            .cultures
            .get_mut(&id)
            .unwrap_or_else(|| panic!("culture {id} not found"))
    }

    fn leader_of(&self, clan: u64) -> u64 {
        self.world
            .clan(clan)
            .leader
            .unwrap_or_else(|| panic!("clan {clan} has no leader"))
    }

    // -- Finalization --

    /// Consume the builder and return the world.
    pub fn build(self) -> CampaignWorld {
        self.world
    }

    /// Build the world and run the given systems for `num_days` from the
    /// scenario's start year.
    pub fn run(
        self,
        systems: &mut [Box<dyn SimSystem>],
        num_days: u32,
        seed: u64,
    ) -> (CampaignWorld, Vec<crate::sim::signal::Signal>) {
        let start_year = self.start_year;
        let mut world = self.build();
        let signals = run(&mut world, systems, SimConfig::new(start_year, num_days, seed))
            .unwrap_or_else(|e| panic!("scenario run failed: {e}"));
        (world, signals)
    }

    /// Borrow the world for inspection.
    pub fn world(&self) -> &CampaignWorld {
        &self.world
    }

    /// Mutably borrow the world for direct setup the builder does not cover.
    pub fn world_mut(&mut self) -> &mut CampaignWorld {
        &mut self.world
    }
}
