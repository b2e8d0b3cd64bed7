use rand::Rng;
use rand::RngCore;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::model::settlement::MAX_LOYALTY;
use crate::model::{CampaignWorld, TroopRoster};

const CAPTURE_CHANCE: f64 = 0.5;
const MILITIA_CONVERSION: f64 = 0.6;
const MILITIA_CONVERSION_SPREAD: f64 = 0.1;
const BASIC_TROOPS: u32 = 50;
const UPGRADED_TROOPS: u32 = 25;

/// Militia strength a town is left with once its uprising is over.
pub const POST_REBELLION_MILITIA: f64 = 100.0;

/// What an uprising does to the garrison and mood of the town it took.
///
/// The old garrison is captured soldier by soldier, most of the militia
/// takes up arms as ranged troops, and the new owner's culture sends fresh
/// recruits. Loyalty is restored to full. A town without a garrison gets an
/// empty one first.
pub fn apply_settlement_consequences(
    world: &mut CampaignWorld,
    rng: &mut dyn RngCore,
    settlement_id: u64,
) {
    let settlement = world.settlement(settlement_id);
    let ranged_militia = world.culture(settlement.culture).ranged_militia_troop;
    let owner_culture = world.culture(world.clan(settlement.owner_clan).culture);
    let basic = owner_culture.basic_troop;
    let upgrade = world
        .troops
        .get(&basic)
        .and_then(|t| t.upgrade_targets.choose(rng).copied());

    let settlement = world.settlement_mut(settlement_id);
    let militia = settlement.militia;
    let garrison = settlement.garrison_mut();

    let mut captured = TroopRoster::new();
    for (troop, count) in garrison.members.iter() {
        for _ in 0..count {
            if rng.random::<f64>() < CAPTURE_CHANCE {
                captured.add(troop, 1);
            }
        }
    }
    garrison.members.clear();
    for (troop, count) in captured.iter() {
        garrison.prisoners.add(troop, count);
    }

    let conversion = rng.random_range(-MILITIA_CONVERSION_SPREAD..MILITIA_CONVERSION_SPREAD)
        + MILITIA_CONVERSION;
    let armed_militia = (militia * conversion) as u32;
    garrison.members.add(ranged_militia, armed_militia);

    garrison.members.add(basic, BASIC_TROOPS);
    match upgrade {
        Some(target) => garrison.members.add(target, UPGRADED_TROOPS),
        None => garrison.members.add(basic, BASIC_TROOPS),
    }

    debug!(
        settlement_id,
        prisoners = captured.total(),
        armed_militia,
        "garrison replaced after uprising"
    );

    settlement.militia = 0.0;
    settlement.loyalty = MAX_LOYALTY;
    settlement.in_rebellious_state = false;
    let militia_party = settlement.militia_party;
    if let Some(party) = militia_party {
        world.destroy_party(party);
    }
}
