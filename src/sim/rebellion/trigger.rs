use tracing::debug;

use super::loyalty::SettlementLoyaltyModel;
use crate::model::CampaignWorld;
use crate::sim::signal::Signal;

/// Whether a settlement takes part in today's rebellious-state and uprising
/// checks: a town, not fighting or besieged, not already held by rebels, and
/// not currently hosting the player.
pub fn is_evaluable(world: &CampaignWorld, settlement_id: u64) -> bool {
    let settlement = world.settlement(settlement_id);
    settlement.is_town()
        && !settlement.in_battle
        && !settlement.under_siege
        && !world.clan(settlement.owner_clan).is_rebel
        && world.player_settlement != Some(settlement_id)
}

/// Recompute a town's rebellious flag from its loyalty, announcing a flip.
/// Returns the new flag.
pub fn refresh_rebellious_state(
    world: &mut CampaignWorld,
    settlement_id: u64,
    model: &dyn SettlementLoyaltyModel,
    signals: &mut Vec<Signal>,
) -> bool {
    let threshold = f64::from(model.rebellious_state_start_loyalty_threshold());
    let settlement = world.settlement_mut(settlement_id);
    let was = settlement.in_rebellious_state;
    settlement.in_rebellious_state = settlement.loyalty <= threshold;
    if was != settlement.in_rebellious_state {
        debug!(
            settlement_id,
            rebellious = settlement.in_rebellious_state,
            loyalty = settlement.loyalty,
            "rebellious state changed"
        );
        signals.push(Signal::RebelliousStateChanged {
            settlement_id,
            rebellious: settlement.in_rebellious_state,
        });
    }
    settlement.in_rebellious_state
}

/// Strength standing against an uprising: the garrison plus every lord party
/// inside whose faction holds the settlement and is still in the game.
pub fn defending_strength(world: &CampaignWorld, settlement_id: u64) -> f64 {
    let faction = world.settlement_map_faction(settlement_id);
    let lords: f64 = world
        .parties_in(settlement_id)
        .filter(|p| p.is_lord_party)
        .filter(|p| {
            let party_faction = world.map_faction_of_clan(p.clan);
            party_faction == faction && !world.faction_eliminated(party_faction)
        })
        .map(|p| world.party_strength(p.id))
        .sum();
    world.garrison_strength(settlement_id) + lords
}

/// The uprising predicate: loyalty at or below the start threshold, and a
/// militia at least `ratio` times the defenders' strength.
pub fn should_rebel(
    world: &CampaignWorld,
    settlement_id: u64,
    model: &dyn SettlementLoyaltyModel,
    ratio: f64,
) -> bool {
    let settlement = world.settlement(settlement_id);
    if settlement.loyalty > f64::from(model.rebellion_start_loyalty_threshold()) {
        return false;
    }
    settlement.militia >= defending_strength(world, settlement_id) * ratio
}
