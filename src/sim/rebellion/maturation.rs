use std::collections::BTreeMap;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::CampaignWorld;
use crate::sim::names::NameGenerator;
use crate::sim::signal::Signal;

/// Days since creation for every rebel clan that has not matured yet.
///
/// A clan is tracked exactly while it is an unmatured rebel clan created by
/// an uprising. Entries leave on maturity or when the host destroys the clan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaturationTracker {
    days_since_creation: BTreeMap<u64, i32>,
}

impl MaturationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a freshly created rebel clan at day 1.
    pub fn register(&mut self, clan_id: u64) {
        let previous = self.days_since_creation.insert(clan_id, 1);
        assert!(previous.is_none(), "rebel clan {clan_id} registered twice");
    }

    /// Stop tracking a clan. Returns whether it was tracked.
    pub fn remove(&mut self, clan_id: u64) -> bool {
        self.days_since_creation.remove(&clan_id).is_some()
    }

    pub fn days(&self, clan_id: u64) -> Option<i32> {
        self.days_since_creation.get(&clan_id).copied()
    }

    pub fn contains(&self, clan_id: u64) -> bool {
        self.days_since_creation.contains_key(&clan_id)
    }

    /// Tracked clans in ascending id order.
    pub fn clans(&self) -> Vec<u64> {
        self.days_since_creation.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.days_since_creation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days_since_creation.is_empty()
    }

    /// Advance a tracked clan by one day and return its new age.
    fn advance(&mut self, clan_id: u64) -> Option<i32> {
        let days = self.days_since_creation.get_mut(&clan_id)?;
        *days += 1;
        Some(*days)
    }

    /// Daily step for one clan: age it, and promote it to an independent
    /// kingdom once it has a leader and holds a settlement. Clans that are
    /// not ready keep ageing and are retried the next day.
    ///
    /// Returns the new kingdom's id when the clan matured.
    pub fn tick_clan(
        &mut self,
        world: &mut CampaignWorld,
        names: &dyn NameGenerator,
        rng: &mut dyn RngCore,
        signals: &mut Vec<Signal>,
        clan_id: u64,
    ) -> Option<u64> {
        let days = self.advance(clan_id)?;
        let clan = world.clan(clan_id);
        let ready = days > 0 && clan.leader.is_some() && world.clan_settlements(clan_id).next().is_some();
        if !ready {
            debug!(clan_id, days, "rebel clan not ready to mature");
            return None;
        }
        self.remove(clan_id);
        Some(mature(world, names, rng, signals, clan_id))
    }
}

/// Rename a rebel clan, drop its rebel status, and found a kingdom around it.
fn mature(
    world: &mut CampaignWorld,
    names: &dyn NameGenerator,
    rng: &mut dyn RngCore,
    signals: &mut Vec<Signal>,
    clan_id: u64,
) -> u64 {
    let clan = world.clan(clan_id);
    let culture_id = clan.culture;
    let leader_id = clan
        .leader
        .unwrap_or_else(|| panic!("maturing clan {clan_id} has no leader"));
    // Fall back to any held settlement if the home seat was never set.
    let home_id = clan
        .home_settlement
        .or_else(|| world.clan_settlements(clan_id).next().map(|s| s.id))
        .unwrap_or_else(|| panic!("maturing clan {clan_id} holds no settlement"));

    let culture = world.culture(culture_id);
    let home = world.settlement(home_id);
    let clan_name = names.clan_name(culture, home, world.hero(leader_id), rng);
    let kingdom_name = names.kingdom_name(world, culture, home, rng);

    let clan = world.clan_mut(clan_id);
    clan.change_name(clan_name.clone(), clan_name.clone());
    clan.is_rebel = false;
    signals.push(Signal::RebelClanMatured {
        settlement_id: home_id,
        clan_id,
    });

    let kingdom_id = world.create_kingdom(kingdom_name.clone(), kingdom_name.clone(), culture_id, clan_id);
    info!(
        clan_id,
        kingdom_id,
        clan = %clan_name,
        kingdom = %kingdom_name,
        "rebel clan matured into kingdom"
    );
    kingdom_id
}
