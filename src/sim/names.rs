use rand::Rng;
use rand::RngCore;

use crate::model::{CampaignWorld, Culture, Hero, Settlement};

const FIRST_PREFIXES: &[&str] = &[
    "Al", "Ar", "Bal", "Bel", "Bor", "Cal", "Cor", "Dar", "Del", "Dor",
    "El", "Er", "Fal", "Fen", "Gar", "Gil", "Hal", "Ith", "Kal", "Kel",
    "Lor", "Mal", "Mar", "Mor", "Nar", "Nor", "Or", "Pel", "Ral", "Ren",
];

const FIRST_SUFFIXES: &[&str] = &[
    "an", "ar", "as", "en", "er", "ia", "id", "il", "in", "ion",
    "is", "na", "on", "or", "ra", "ren", "ric", "rin", "us", "wen",
];

const CLAN_PATTERNS: &[&str] = &[
    "{leader}'s Kin",
    "Free Company of {home}",
    "Sons of {home}",
    "House {leader}",
    "{home} Wardens",
];

const REALM_PREFIXES: &[&str] = &[
    "Free", "Risen", "Crimson", "Ashen", "Iron", "Unbowed", "New", "Sworn",
];

const REALM_TYPES: &[&str] = &[
    "Kingdom", "Dominion", "League", "Compact", "Throne", "Banner", "Reach", "Crown",
];

const SUFFIXES: &[&str] = &["Reborn", "Ascendant", "Resurgent", "Renewed"];

/// Names for the heroes, clans, and kingdoms an uprising creates.
pub trait NameGenerator: Send + Sync {
    fn hero_name(&self, culture: &Culture, rng: &mut dyn RngCore) -> String;

    /// Name for a clan seated at `home` and led by `leader`.
    fn clan_name(
        &self,
        culture: &Culture,
        home: &Settlement,
        leader: &Hero,
        rng: &mut dyn RngCore,
    ) -> String;

    /// Name for a kingdom founded at `home`, unique among living kingdoms.
    fn kingdom_name(
        &self,
        world: &CampaignWorld,
        culture: &Culture,
        home: &Settlement,
        rng: &mut dyn RngCore,
    ) -> String;
}

/// Syllable-table names, flavored with the culture and home settlement.
#[derive(Debug, Clone, Copy, Default)]
pub struct CultureNameGenerator;

fn pick<'a>(table: &[&'a str], rng: &mut dyn RngCore) -> &'a str {
    table[rng.random_range(0..table.len())]
}

fn realm_name(culture: &Culture, home: &Settlement, rng: &mut dyn RngCore) -> String {
    let prefix = pick(REALM_PREFIXES, rng);
    let kind = pick(REALM_TYPES, rng);
    if rng.random_bool(0.5) {
        format!("{prefix} {kind} of {}", home.name)
    } else {
        format!("{prefix} {} {kind}", culture.name)
    }
}

impl NameGenerator for CultureNameGenerator {
    fn hero_name(&self, culture: &Culture, rng: &mut dyn RngCore) -> String {
        let prefix = pick(FIRST_PREFIXES, rng);
        let suffix = pick(FIRST_SUFFIXES, rng);
        format!("{prefix}{suffix} of {}", culture.name)
    }

    fn clan_name(
        &self,
        _culture: &Culture,
        home: &Settlement,
        leader: &Hero,
        rng: &mut dyn RngCore,
    ) -> String {
        let given = leader.name.split_whitespace().next().unwrap_or(&leader.name);
        pick(CLAN_PATTERNS, rng)
            .replace("{leader}", given)
            .replace("{home}", &home.name)
    }

    /// Falls back to adding a suffix after 5 attempts.
    fn kingdom_name(
        &self,
        world: &CampaignWorld,
        culture: &Culture,
        home: &Settlement,
        rng: &mut dyn RngCore,
    ) -> String {
        for _ in 0..5 {
            let name = realm_name(culture, home, rng);
            let is_taken = world
                .kingdoms
                .values()
                .any(|k| !k.is_eliminated && k.name == name);
            if !is_taken {
                return name;
            }
        }
        let base = realm_name(culture, home, rng);
        format!("{base} {}", pick(SUFFIXES, rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::model::{Kingdom, SettlementKind};

    fn culture() -> Culture {
        Culture {
            id: 1,
            name: "Sturgia".into(),
            basic_troop: 2,
            ranged_militia_troop: 3,
            rebellious_hero_templates: vec![],
            banner_icon_ids: None,
        }
    }

    fn home() -> Settlement {
        Settlement::new(5, "Balgard".into(), SettlementKind::Town, 1, 9)
    }

    #[test]
    fn clan_name_uses_leader_or_home() {
        let mut rng = SmallRng::seed_from_u64(42);
        let leader = Hero::new(7, "Gareth of Sturgia".into(), 1, 30);
        for _ in 0..20 {
            let name = CultureNameGenerator.clan_name(&culture(), &home(), &leader, &mut rng);
            assert!(
                name.contains("Gareth") || name.contains("Balgard"),
                "unexpected clan name: {name}"
            );
            assert!(!name.contains('{'));
        }
    }

    #[test]
    fn kingdom_name_avoids_living_names() {
        let mut world = CampaignWorld::new();
        let mut probe = SmallRng::seed_from_u64(123);
        let taken = realm_name(&culture(), &home(), &mut probe);
        world.kingdoms.insert(
            1,
            Kingdom {
                id: 1,
                name: taken.clone(),
                informal_name: taken.clone(),
                culture: 1,
                ruling_clan: 9,
                is_eliminated: false,
            },
        );

        let mut rng = SmallRng::seed_from_u64(123);
        let name = CultureNameGenerator.kingdom_name(&world, &culture(), &home(), &mut rng);
        assert_ne!(name, taken);
    }

    #[test]
    fn deterministic() {
        let mut rng1 = SmallRng::seed_from_u64(9);
        let mut rng2 = SmallRng::seed_from_u64(9);
        assert_eq!(
            CultureNameGenerator.hero_name(&culture(), &mut rng1),
            CultureNameGenerator.hero_name(&culture(), &mut rng2)
        );
    }
}
