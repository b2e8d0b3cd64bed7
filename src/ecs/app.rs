use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::campaign::{Campaign, CampaignNotification, CampaignSignal, Rebellion, SimRng};
use super::clock::SimClock;
use super::conditions::daily;
use super::rebellion::{deliver_campaign_signals, run_rebellion_day, sync_campaign_time};
use super::schedule::{SimPhase, configure_sim_schedule};
use crate::model::CampaignWorld;
use crate::sim::RebellionSystem;

/// Build a headless Bevy app hosting the rebellion engine over `campaign`.
///
/// The clock starts at `campaign.current_time`. Each `SimTick` is one hour;
/// the engine's daily pass runs on the first tick of every day, and host
/// signals written as [`CampaignSignal`] are delivered in `SimPhase::Reactions`.
///
/// ```no_run
/// # use rebel_kingdoms::ecs::{build_campaign_app, SimTick};
/// # use rebel_kingdoms::{CampaignWorld, RebellionConfig, RebellionSystem};
/// let mut app = build_campaign_app(CampaignWorld::new(), RebellionSystem::new(RebellionConfig::builtin()), 42);
/// for _ in 0..24 * 30 {  // one month of hourly ticks
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_campaign_app(campaign: CampaignWorld, rebellion: RebellionSystem, seed: u64) -> App {
    build_campaign_app_with_executor(campaign, rebellion, seed, ExecutorKind::SingleThreaded)
}

/// Build the app with a specific executor kind.
pub fn build_campaign_app_with_executor(
    campaign: CampaignWorld,
    rebellion: RebellionSystem,
    seed: u64,
    executor: ExecutorKind,
) -> App {
    let mut app = App::empty();

    app.insert_resource(SimClock::new(campaign.current_time));
    app.insert_resource(Campaign(campaign));
    app.insert_resource(Rebellion(rebellion));
    app.insert_resource(SimRng {
        rng: SmallRng::seed_from_u64(seed),
        seed,
    });

    MessageRegistry::register_message::<CampaignSignal>(app.world_mut());
    MessageRegistry::register_message::<CampaignNotification>(app.world_mut());

    let mut schedule = configure_sim_schedule(executor);
    schedule.add_systems(
        (bevy_ecs::message::message_update_system, sync_campaign_time).in_set(SimPhase::PreUpdate),
    );
    schedule.add_systems(run_rebellion_day.run_if(daily).in_set(SimPhase::Update));
    schedule.add_systems(deliver_campaign_signals.in_set(SimPhase::Reactions));
    app.add_schedule(schedule);
    app
}

#[cfg(test)]
mod tests {
    use bevy_ecs::message::Messages;

    use super::*;
    use crate::config::RebellionConfig;
    use crate::ecs::schedule::SimTick;
    use crate::model::SimTimestamp;
    use crate::model::timestamp::HOURS_PER_DAY;

    fn empty_app() -> App {
        let mut world = CampaignWorld::new();
        world.current_time = SimTimestamp::from_year(1084);
        build_campaign_app(world, RebellionSystem::new(RebellionConfig::default()), 42)
    }

    #[test]
    fn app_builds_without_panic() {
        let _app = empty_app();
    }

    #[test]
    fn day_of_ticks_advances_clock_and_campaign_time() {
        let mut app = empty_app();
        for _ in 0..HOURS_PER_DAY {
            app.world_mut().run_schedule(SimTick);
        }
        let clock = app.world().resource::<SimClock>();
        assert_eq!(clock.time, SimTimestamp::new(1084, 2, 0));
        assert_eq!(clock.tick_count, u64::from(HOURS_PER_DAY));
        // Campaign time is synced at the start of each tick.
        let campaign = app.world().resource::<Campaign>();
        assert_eq!(campaign.0.current_time, SimTimestamp::new(1084, 1, 23));
    }

    #[test]
    fn unknown_clan_destroyed_signal_is_harmless() {
        let mut app = empty_app();
        app.world_mut()
            .resource_mut::<Messages<CampaignSignal>>()
            .write(CampaignSignal(crate::sim::Signal::ClanDestroyed { clan_id: 77 }));
        app.world_mut().run_schedule(SimTick);
        assert!(app.world().resource::<Messages<CampaignSignal>>().is_empty());
        assert!(app.world().resource::<Rebellion>().0.tracker().is_empty());
    }
}
