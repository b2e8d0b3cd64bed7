use rand::Rng;
use rand::RngCore;
use rand::seq::IndexedRandom;
use tracing::{info, warn};

use super::consequences::{POST_REBELLION_MILITIA, apply_settlement_consequences};
use super::heroes::{RebelRole, create_rebel_hero};
use super::icons::IconFrequencyTable;
use super::maturation::MaturationTracker;
use crate::model::{CampaignWorld, HeroState, MapFaction, WarCause};
use crate::sim::names::NameGenerator;
use crate::sim::signal::Signal;

const LEADER_GOLD: i64 = 50_000;
const LEADER_AI_GRACE_HOURS: u32 = 5;

/// Who came out of an uprising.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UprisingOutcome {
    pub clan: u64,
    pub leader: u64,
    pub governor: u64,
    pub supporters: [u64; 2],
    pub leader_party: u64,
    pub previous_owner: u64,
}

impl UprisingOutcome {
    /// Leader, governor, then both supporters.
    pub fn heroes(&self) -> [u64; 4] {
        [self.leader, self.governor, self.supporters[0], self.supporters[1]]
    }
}

/// Mutable engine state an uprising writes to.
pub struct UprisingState<'a> {
    pub icons: &'a mut IconFrequencyTable,
    pub tracker: &'a mut MaturationTracker,
    pub names: &'a dyn NameGenerator,
}

/// Turn a town over to a new rebel clan.
///
/// Runs as one uninterrupted transaction: raise four heroes, found and
/// register their clan, field its lords, declare war on the old rulers,
/// rewrite relations, transfer the town, then rebuild its garrison.
/// Returns `None` without touching anything if the town's culture has no
/// rebel hero templates.
pub fn execute_uprising(
    world: &mut CampaignWorld,
    rng: &mut dyn RngCore,
    signals: &mut Vec<Signal>,
    state: UprisingState<'_>,
    settlement_id: u64,
) -> Option<UprisingOutcome> {
    let settlement = world.settlement(settlement_id);
    let previous_owner = settlement.owner_clan;
    let culture_id = settlement.culture;
    let templates = world.culture(culture_id).rebellious_hero_templates.clone();
    if templates.is_empty() {
        warn!(settlement_id, culture_id, "culture has no rebel hero templates; uprising skipped");
        return None;
    }
    info!(settlement_id, previous_owner, "uprising started");

    // Heroes
    let raise = |world: &mut CampaignWorld, rng: &mut dyn RngCore, role| {
        let template = *templates.choose(rng)?;
        Some(create_rebel_hero(world, state.names, rng, template, settlement_id, role))
    };
    let leader = raise(world, rng, RebelRole::Leader)?;
    let governor = raise(world, rng, RebelRole::Governor)?;
    let supporters = [
        raise(world, rng, RebelRole::Supporter)?,
        raise(world, rng, RebelRole::Supporter)?,
    ];
    let heroes = [leader, governor, supporters[0], supporters[1]];

    // Clan
    let icon = state.icons.allocate(world.culture(culture_id), rng);
    let clan = world.create_settlement_rebel_clan(settlement_id, leader, icon);
    let renown: u32 = rng.random_range(200..300);
    {
        let clan = world.clan_mut(clan);
        clan.is_noble = true;
        clan.add_renown(f64::from(renown));
    }
    for hero in heroes {
        world.add_hero_to_clan(hero, clan);
    }
    state.tracker.register(clan);
    for hero in heroes {
        world.hero_mut(hero).change_state(HeroState::Active);
    }

    // Lords and war
    let leader_party = world.spawn_lord_party(leader, settlement_id);
    world.spawn_lord_party(supporters[0], settlement_id);
    world.spawn_lord_party(supporters[1], settlement_id);
    let previous_faction = world.map_faction_of_clan(previous_owner);
    world.declare_war(MapFaction::Clan(clan), previous_faction, WarCause::Rebellion);

    rewrite_relations(world, rng, previous_faction, culture_id, &heroes);

    // Hand over the town
    world.change_owner_by_rebellion(leader, settlement_id);
    world.change_governor(settlement_id, governor);
    world.enter_settlement(leader_party, settlement_id);
    let now = world.current_time;
    world
        .party_mut(leader_party)
        .disable_ai_for_hours(now, LEADER_AI_GRACE_HOURS);
    world.change_hero_gold(leader, LEADER_GOLD);
    signals.push(Signal::ClanCreated {
        clan_id: clan,
        is_companion: false,
    });

    apply_settlement_consequences(world, rng, settlement_id);
    signals.push(Signal::RebellionFinished {
        settlement_id,
        previous_owner_clan_id: previous_owner,
    });
    let settlement = world.settlement_mut(settlement_id);
    settlement.food_stocks = settlement.food_capacity;
    settlement.militia = POST_REBELLION_MILITIA;

    info!(settlement_id, clan, leader, renown, ?icon, "uprising finished");
    Some(UprisingOutcome {
        clan,
        leader,
        governor,
        supporters,
        leader_party,
        previous_owner,
    })
}

/// Relations after an uprising: the deposed ruler hates every rebel hero,
/// foreign kings take a view shaped by their own size and culture, and the
/// rebels warm to each other.
fn rewrite_relations(
    world: &mut CampaignWorld,
    rng: &mut dyn RngCore,
    previous_faction: MapFaction,
    rebel_culture: u64,
    heroes: &[u64; 4],
) {
    let previous_leader = world.faction_leader(previous_faction);
    let previous_culture = world.faction_culture(previous_faction);
    let foreign_kingdoms: Vec<u64> = world
        .kingdoms
        .values()
        .filter(|k| !k.is_eliminated && k.culture != previous_culture)
        .map(|k| k.id)
        .collect();

    for &hero in heroes {
        if let Some(ruler) = previous_leader {
            world.change_relation(ruler, hero, rng.random_range(-85..-75));
        }

        for &kingdom in &foreign_kingdoms {
            let fiefs = world.kingdom_weighted_fiefs(kingdom);
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let base = (r1 * r2 * 30.0 - f64::from(fiefs)) as i32;
            let value = if world.kingdom(kingdom).culture == rebel_culture {
                base + rng.random_range(55..65)
            } else {
                base
            };
            if let Some(king) = world.faction_leader(MapFaction::Kingdom(kingdom)) {
                world.set_personal_relation(king, hero, value);
            }
        }

        for &other in heroes {
            if other != hero {
                world.change_relation(hero, other, rng.random_range(5..15));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::scenario::Scenario;
    use crate::sim::names::CultureNameGenerator;

    struct Uprising {
        world: CampaignWorld,
        town: u64,
        old_clan: u64,
        kingdom: u64,
        foreign_king: u64,
    }

    fn low_loyalty_town() -> Uprising {
        let mut s = Scenario::new();
        let vlandia = s.add_culture("Vlandia");
        let battania = s.add_culture("Battania");
        let realm = s.add_kingdom("Vlandia", vlandia);
        let foreign = s.add_kingdom("Battania", battania);
        let village_owner = realm.ruling_clan;
        let town = s.add_town("Pravend", vlandia, realm.ruling_clan);
        s.add_village("Ryibelet", vlandia, village_owner, town);
        s.settlement_mut(town)
            .loyalty(4.0)
            .militia(120.0)
            .food(3.0, 80.0);
        Uprising {
            world: s.build(),
            town,
            old_clan: realm.ruling_clan,
            kingdom: realm.kingdom,
            foreign_king: foreign.ruler,
        }
    }

    fn run_uprising(u: &mut Uprising, seed: u64) -> (UprisingOutcome, Vec<Signal>, MaturationTracker) {
        let mut icons = IconFrequencyTable::new();
        let mut tracker = MaturationTracker::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut signals = Vec::new();
        let outcome = execute_uprising(
            &mut u.world,
            &mut rng,
            &mut signals,
            UprisingState {
                icons: &mut icons,
                tracker: &mut tracker,
                names: &CultureNameGenerator,
            },
            u.town,
        )
        .expect("uprising should run");
        (outcome, signals, tracker)
    }

    #[test]
    fn town_changes_hands_to_new_rebel_clan() {
        let mut u = low_loyalty_town();
        let (outcome, signals, tracker) = run_uprising(&mut u, 21);
        let world = &u.world;
        let town = world.settlement(u.town);
        let clan = world.clan(outcome.clan);

        assert_eq!(town.owner_clan, outcome.clan);
        assert!((town.loyalty - 100.0).abs() < f64::EPSILON);
        assert!(!town.in_rebellious_state);
        assert!((town.food_stocks - 80.0).abs() < f64::EPSILON);
        assert!((town.militia - 100.0).abs() < f64::EPSILON);
        assert_eq!(town.governor, Some(outcome.governor));
        assert!(world.bound_villages(u.town).iter().all(|v| world.settlement(*v).owner_clan == outcome.clan));

        assert!(clan.is_rebel && clan.is_noble);
        assert_eq!(clan.members.len(), 4);
        assert_eq!(clan.leader, Some(outcome.leader));
        assert!((200.0..300.0).contains(&clan.renown));
        assert!(clan.banner_icon.is_some());
        assert_eq!(tracker.days(outcome.clan), Some(1));
        assert!(outcome
            .heroes()
            .iter()
            .all(|h| world.hero(*h).state == HeroState::Active));
        assert_eq!(world.hero(outcome.leader).gold, LEADER_GOLD);

        assert!(world.is_at_war(MapFaction::Clan(outcome.clan), MapFaction::Kingdom(u.kingdom)));
        assert_eq!(
            signals,
            vec![
                Signal::ClanCreated {
                    clan_id: outcome.clan,
                    is_companion: false
                },
                Signal::RebellionFinished {
                    settlement_id: u.town,
                    previous_owner_clan_id: u.old_clan
                },
            ]
        );
    }

    #[test]
    fn lords_are_fielded_and_leader_waits_in_town() {
        let mut u = low_loyalty_town();
        let (outcome, _, _) = run_uprising(&mut u, 5);
        let world = &u.world;
        let rebel_parties: Vec<_> = world
            .parties
            .values()
            .filter(|p| p.clan == outcome.clan)
            .collect();
        assert_eq!(rebel_parties.len(), 3);
        assert!(rebel_parties.iter().all(|p| p.is_lord_party && p.current_settlement == Some(u.town)));
        let leader_party = world.party(outcome.leader_party);
        assert_eq!(leader_party.leader, Some(outcome.leader));
        assert!(!leader_party.is_ai_enabled(world.current_time));
        assert!(leader_party.is_ai_enabled(world.current_time.plus_hours(5)));
        assert!(world.parties.values().all(|p| p.leader != Some(outcome.governor)));
    }

    #[test]
    fn relations_reflect_the_uprising() {
        let mut u = low_loyalty_town();
        let old_ruler = u.world.clan(u.old_clan).leader.unwrap();
        let (outcome, _, _) = run_uprising(&mut u, 8);
        let world = &u.world;

        for hero in outcome.heroes() {
            let toward_old = world.hero(hero).relation_with(old_ruler);
            assert!((-85..-75).contains(&toward_old), "old ruler relation {toward_old}");

            // A fiefless foreign kingdom of another culture: trunc(r1 * r2 * 30).
            let foreign = world.hero(hero).relation_with(u.foreign_king);
            assert!((0..30).contains(&foreign), "foreign relation {foreign}");

            for other in outcome.heroes() {
                if other != hero {
                    // Each pair is adjusted once from each side.
                    let mutual = world.hero(hero).relation_with(other);
                    assert!((10..=28).contains(&mutual), "mutual relation {mutual}");
                    assert_eq!(mutual, world.hero(other).relation_with(hero));
                }
            }
        }
    }

    #[test]
    fn kin_kingdom_favors_rebels_of_its_culture() {
        let mut s = Scenario::new();
        let vlandia = s.add_culture("Vlandia");
        let battania = s.add_culture("Battania");
        let occupier = s.add_kingdom("Vlandia", vlandia);
        let kin = s.add_kingdom("Battania", battania);
        s.add_castle("Caer Banno", battania, kin.ruling_clan);
        let town = s.add_town("Marunath", battania, occupier.ruling_clan);
        let mut u = Uprising {
            world: s.build(),
            town,
            old_clan: occupier.ruling_clan,
            kingdom: occupier.kingdom,
            foreign_king: kin.ruler,
        };
        let (outcome, _, _) = run_uprising(&mut u, 13);

        for hero in outcome.heroes() {
            // trunc(r1 * r2 * 30 - 1) + 55..65 for one castle.
            let kin_relation = u.world.hero(hero).relation_with(u.foreign_king);
            assert!((54..=93).contains(&kin_relation), "kin relation {kin_relation}");
        }
    }

    #[test]
    fn culture_without_templates_skips_uprising() {
        let mut u = low_loyalty_town();
        let culture = u.world.settlement(u.town).culture;
        u.world
            .cultures
            .get_mut(&culture)
            .unwrap()
            .rebellious_hero_templates
            .clear();
        let heroes_before = u.world.heroes.len();

        let mut icons = IconFrequencyTable::new();
        let mut tracker = MaturationTracker::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut signals = Vec::new();
        let outcome = execute_uprising(
            &mut u.world,
            &mut rng,
            &mut signals,
            UprisingState {
                icons: &mut icons,
                tracker: &mut tracker,
                names: &CultureNameGenerator,
            },
            u.town,
        );
        assert!(outcome.is_none());
        assert_eq!(u.world.heroes.len(), heroes_before);
        assert_eq!(u.world.settlement(u.town).owner_clan, u.old_clan);
        assert!(signals.is_empty() && tracker.is_empty());
    }
}
