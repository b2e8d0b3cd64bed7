mod common;

use rebel_kingdoms::sim::rebellion::{RebellionSystem, install};
use rebel_kingdoms::sim::{SimConfig, SystemRegistry, run, save_systems};
use rebel_kingdoms::{CampaignWorld, SaveStore, Signal};

fn campaign(seed: u64) -> (CampaignWorld, Vec<Signal>, SaveStore) {
    let common::Realm { mut world, .. } = common::restive_realm();
    let mut registry = SystemRegistry::new();
    install(&mut registry, RebellionSystem::new(common::eager_config()));
    let log = run(&mut world, registry.systems_mut(), SimConfig::new(1084, 10, seed)).unwrap();
    let store = save_systems(registry.systems()).unwrap();
    (world, log, store)
}

#[test]
fn same_seed_same_campaign() {
    let (world_a, log_a, store_a) = campaign(99);
    let (world_b, log_b, store_b) = campaign(99);

    assert_eq!(log_a, log_b);
    assert_eq!(store_a, store_b);
    assert_eq!(world_a.clans.keys().collect::<Vec<_>>(), world_b.clans.keys().collect::<Vec<_>>());
    for (id, clan) in &world_a.clans {
        assert_eq!(clan, &world_b.clans[id]);
    }
    for (id, hero) in &world_a.heroes {
        assert_eq!(hero, &world_b.heroes[id]);
    }
}

#[test]
fn every_seed_yields_exactly_one_uprising() {
    for seed in 0..8 {
        let (_, log, _) = campaign(seed);
        let uprisings = log
            .iter()
            .filter(|s| matches!(s, Signal::RebellionFinished { .. }))
            .count();
        assert_eq!(uprisings, 1, "seed {seed}");
    }
}
