use std::ops::Range;

use rand::Rng;
use rand::RngCore;

use crate::model::{CampaignWorld, Skill};
use crate::sim::names::NameGenerator;

const REBEL_AGE: Range<u32> = 25..40;

/// The part a hero plays in a fresh uprising; decides its starting skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebelRole {
    Leader,
    Governor,
    Supporter,
}

impl RebelRole {
    /// Starting skill ranges, upper bound exclusive.
    pub fn skill_ranges(self) -> [(Skill, Range<u32>); 3] {
        match self {
            RebelRole::Leader => [
                (Skill::Steward, 100..175),
                (Skill::Leadership, 125..175),
                (Skill::OneHanded, 125..175),
            ],
            RebelRole::Governor => [
                (Skill::Steward, 125..200),
                (Skill::Leadership, 100..125),
                (Skill::OneHanded, 60..90),
            ],
            RebelRole::Supporter => [
                (Skill::Steward, 100..175),
                (Skill::Leadership, 100..175),
                (Skill::OneHanded, 125..175),
            ],
        }
    }
}

/// Create one rebel hero at `settlement_id` from a template.
///
/// The hero starts with the template's perks, then loses any perk its rolled
/// skills do not actually reach.
pub fn create_rebel_hero(
    world: &mut CampaignWorld,
    names: &dyn NameGenerator,
    rng: &mut dyn RngCore,
    template_id: u64,
    settlement_id: u64,
    role: RebelRole,
) -> u64 {
    let culture_id = world.settlement(settlement_id).culture;
    let name = names.hero_name(world.culture(culture_id), rng);
    let age = rng.random_range(REBEL_AGE);
    let hero_id = world.create_special_hero(template_id, settlement_id, name, age);

    let hero = world.hero_mut(hero_id);
    for (skill, range) in role.skill_ranges() {
        hero.set_initial_skill_level(skill, rng.random_range(range));
    }
    revoke_unmet_perks(world, hero_id);
    hero_id
}

/// Strip perks whose skill requirement the hero does not meet.
pub fn revoke_unmet_perks(world: &mut CampaignWorld, hero_id: u64) {
    let hero = world.hero(hero_id);
    let unmet: Vec<u64> = world
        .perks
        .values()
        .filter(|perk| hero.has_perk(perk.id) && hero.skill(perk.skill) < perk.required_skill_value)
        .map(|perk| perk.id)
        .collect();
    let hero = world.hero_mut(hero_id);
    for perk in unmet {
        hero.set_perk_without_validation(perk, false);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::scenario::Scenario;
    use crate::sim::names::CultureNameGenerator;

    #[test]
    fn rolled_skills_stay_in_role_ranges() {
        let mut s = Scenario::new();
        let culture = s.add_culture("Empire");
        let clan = s.add_clan("Vizartos", culture);
        let town = s.add_town("Lycaron", culture, clan);
        let template = s.add_hero_template("rebel", culture, &[]);
        let mut world = s.build();
        let mut rng = SmallRng::seed_from_u64(11);

        for role in [RebelRole::Leader, RebelRole::Governor, RebelRole::Supporter] {
            for _ in 0..25 {
                let id = create_rebel_hero(&mut world, &CultureNameGenerator, &mut rng, template, town, role);
                let hero = world.hero(id);
                for (skill, range) in role.skill_ranges() {
                    assert!(range.contains(&hero.skill(skill)), "{role:?} {skill:?} = {}", hero.skill(skill));
                }
                assert!(REBEL_AGE.contains(&hero.age));
                assert_eq!(hero.born_at, Some(town));
                assert_eq!(hero.clan, None);
            }
        }
    }

    #[test]
    fn template_perks_above_skill_are_revoked() {
        let mut s = Scenario::new();
        let culture = s.add_culture("Empire");
        let clan = s.add_clan("Vizartos", culture);
        let town = s.add_town("Lycaron", culture, clan);
        let easy = s.add_perk("Drilled", Skill::Leadership, 50);
        let hard = s.add_perk("Ultimate Leader", Skill::Leadership, 250);
        let unrelated = s.add_perk("Bowyer", Skill::Bow, 300);
        let template = s.add_hero_template("rebel", culture, &[easy, hard]);
        let mut world = s.build();
        let mut rng = SmallRng::seed_from_u64(5);

        let id = create_rebel_hero(&mut world, &CultureNameGenerator, &mut rng, template, town, RebelRole::Leader);
        let hero = world.hero(id);
        assert!(hero.has_perk(easy));
        assert!(!hero.has_perk(hard));
        assert!(!hero.has_perk(unrelated));
    }
}
