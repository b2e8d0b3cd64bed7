use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const MIN_RELATION: i32 = -100;
pub const MAX_RELATION: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    OneHanded,
    TwoHanded,
    Bow,
    Riding,
    Tactics,
    Leadership,
    Steward,
    Trade,
}

/// A perk from the object catalog, unlocked by reaching a skill level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perk {
    pub id: u64,
    pub name: String,
    pub skill: Skill,
    pub required_skill_value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroState {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u64,
    pub name: String,
    pub culture: u64,
    pub age: u32,
    pub clan: Option<u64>,
    pub state: HeroState,
    pub gold: i64,
    /// Settlement the hero was created at.
    pub born_at: Option<u64>,
    /// Template the hero was generated from, if any.
    pub template: Option<u64>,
    pub skills: BTreeMap<Skill, u32>,
    pub perks: BTreeSet<u64>,
    /// Personal relations, kept symmetric by the world's relation helpers.
    pub relations: BTreeMap<u64, i32>,
}

impl Hero {
    pub fn new(id: u64, name: String, culture: u64, age: u32) -> Self {
        Self {
            id,
            name,
            culture,
            age,
            clan: None,
            state: HeroState::Inactive,
            gold: 0,
            born_at: None,
            template: None,
            skills: BTreeMap::new(),
            perks: BTreeSet::new(),
            relations: BTreeMap::new(),
        }
    }

    pub fn skill(&self, skill: Skill) -> u32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    /// Set a skill's starting level. Perks already held are left untouched.
    pub fn set_initial_skill_level(&mut self, skill: Skill, level: u32) {
        self.skills.insert(skill, level);
    }

    pub fn has_perk(&self, perk: u64) -> bool {
        self.perks.contains(&perk)
    }

    /// Grant or revoke a perk without checking the skill requirement.
    pub fn set_perk_without_validation(&mut self, perk: u64, value: bool) {
        if value {
            self.perks.insert(perk);
        } else {
            self.perks.remove(&perk);
        }
    }

    /// Relation toward another hero (0 when unset).
    pub fn relation_with(&self, other: u64) -> i32 {
        self.relations.get(&other).copied().unwrap_or(0)
    }

    pub fn change_state(&mut self, state: HeroState) {
        self.state = state;
    }
}
