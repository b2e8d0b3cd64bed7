mod common;

use bevy_ecs::message::Messages;
use rebel_kingdoms::config::RebellionConfig;
use rebel_kingdoms::ecs::{Campaign, CampaignNotification, CampaignSignal, Rebellion, SimTick, build_campaign_app};
use rebel_kingdoms::model::timestamp::HOURS_PER_DAY;
use rebel_kingdoms::sim::RebellionSystem;
use rebel_kingdoms::Signal;

fn drain_notifications(app: &mut bevy_app::App) -> Vec<Signal> {
    app.world_mut()
        .resource_mut::<Messages<CampaignNotification>>()
        .drain()
        .map(|n| n.0)
        .collect()
}

#[test]
fn uprising_runs_on_the_daily_tick() {
    let realm = common::restive_realm();
    let mut app = build_campaign_app(realm.world, RebellionSystem::new(common::eager_config()), 42);

    app.world_mut().run_schedule(SimTick);
    let notes = drain_notifications(&mut app);
    assert!(notes.iter().any(|n| matches!(
        n,
        Signal::RebellionFinished { settlement_id, .. } if *settlement_id == realm.restive_town
    )));

    let campaign = &app.world().resource::<Campaign>().0;
    let rebels = campaign.settlement(realm.restive_town).owner_clan;
    assert!(campaign.clan(rebels).is_rebel);
    assert_eq!(app.world().resource::<Rebellion>().0.tracker().days(rebels), Some(1));

    // Nothing more happens until the next day starts.
    for _ in 1..HOURS_PER_DAY {
        app.world_mut().run_schedule(SimTick);
    }
    assert!(drain_notifications(&mut app).is_empty());

    app.world_mut().run_schedule(SimTick);
    let notes = drain_notifications(&mut app);
    assert!(notes.contains(&Signal::RebelClanMatured {
        settlement_id: realm.restive_town,
        clan_id: rebels,
    }));
    let campaign = &app.world().resource::<Campaign>().0;
    assert!(campaign.clan(rebels).kingdom.is_some());
}

#[test]
fn siege_signal_flags_a_besieged_town() {
    let mut realm = common::restive_realm();
    let town = realm.restive_town;
    {
        let settlement = realm.world.settlement_mut(town);
        settlement.under_siege = true;
        settlement.loyalty = 20.0;
    }
    let mut app = build_campaign_app(realm.world, RebellionSystem::new(RebellionConfig::default()), 1);

    app.world_mut()
        .resource_mut::<Messages<CampaignSignal>>()
        .write(CampaignSignal(Signal::SiegeStarted { settlement_id: town }));
    app.world_mut().run_schedule(SimTick);

    let notes = drain_notifications(&mut app);
    assert_eq!(
        notes,
        vec![Signal::RebelliousStateChanged {
            settlement_id: town,
            rebellious: true
        }]
    );
    let campaign = &app.world().resource::<Campaign>().0;
    assert!(campaign.settlement(town).in_rebellious_state);
    assert_eq!(campaign.settlement(town).owner_clan, realm.ruling_clan);
}
