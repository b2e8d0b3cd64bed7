#![allow(dead_code)]

use rebel_kingdoms::CampaignWorld;
use rebel_kingdoms::config::RebellionConfig;
use rebel_kingdoms::scenario::Scenario;
use rebel_kingdoms::sim::rebellion::loyalty::LoyaltyThresholds;

/// IDs of interest in [`restive_realm`].
pub struct Realm {
    pub world: CampaignWorld,
    pub kingdom: u64,
    pub ruling_clan: u64,
    pub restive_town: u64,
    pub loyal_town: u64,
    pub village: u64,
    pub footman: u64,
}

/// A Vlandian kingdom with one town on the edge of revolt (loyalty 9,
/// militia 140, 90 footmen in garrison) and one content town, next to a
/// fiefless Battanian kingdom.
pub fn restive_realm() -> Realm {
    let mut s = Scenario::at_year(1084);
    let vlandia = s.add_culture("Vlandia");
    let battania = s.add_culture("Battania");
    let realm = s.add_kingdom("Kingdom of Vlandia", vlandia);
    s.add_kingdom("Battania", battania);
    let footman = s.add_troop("Vlandian Footman", vlandia, 1.0, &[]);

    let restive_town = s.add_town("Pravend", vlandia, realm.ruling_clan);
    s.settlement_mut(restive_town)
        .loyalty(9.0)
        .militia(140.0)
        .garrison(footman, 90)
        .food(10.0, 120.0);
    let village = s.add_village("Ryibelet", vlandia, realm.ruling_clan, restive_town);
    let loyal_town = s.add_town("Sargot", vlandia, realm.ruling_clan);
    s.settlement_mut(loyal_town).loyalty(70.0).militia(40.0);

    Realm {
        world: s.build(),
        kingdom: realm.kingdom,
        ruling_clan: realm.ruling_clan,
        restive_town,
        loyal_town,
        village,
        footman,
    }
}

/// Uprisings start whenever the predicate holds; rebellions begin at loyalty 10.
pub fn eager_config() -> RebellionConfig {
    RebellionConfig {
        trigger_chance: 1.0,
        loyalty: LoyaltyThresholds {
            rebellious_state_threshold: 25,
            rebellion_start_threshold: 10,
            loyalty_boost_after_rebellion: 5.0,
        },
        ..RebellionConfig::default()
    }
}
