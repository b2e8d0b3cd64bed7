use bevy_ecs::message::Messages;
use bevy_ecs::system::{Res, ResMut};
use bevy_ecs::world::{Mut, World};
use tracing::debug;

use super::campaign::{Campaign, CampaignNotification, CampaignSignal, Rebellion, SimRng};
use super::clock::SimClock;
use crate::sim::{Signal, SimSystem, TickContext};

/// Keep the campaign's notion of "now" in step with the clock.
pub fn sync_campaign_time(clock: Res<SimClock>, mut campaign: ResMut<Campaign>) {
    campaign.0.current_time = clock.time;
}

/// Exclusive system running the engine's daily pass. Registered with the
/// `daily` run condition.
pub fn run_rebellion_day(world: &mut World) {
    let mut signals = Vec::new();
    world.resource_scope(|world, mut rebellion: Mut<Rebellion>| {
        world.resource_scope(|world, mut rng: Mut<SimRng>| {
            let mut campaign = world.resource_mut::<Campaign>();
            let mut ctx = TickContext {
                world: &mut campaign.0,
                rng: &mut rng.rng,
                signals: &mut signals,
                inbox: &[],
            };
            rebellion.0.daily_tick(&mut ctx);
        });
    });
    notify(world, signals);
}

/// Exclusive system handing queued host signals to the engine.
pub fn deliver_campaign_signals(world: &mut World) {
    let inbox: Vec<_> = match world.get_resource_mut::<Messages<CampaignSignal>>() {
        Some(mut messages) => messages.drain().map(|m| m.0).collect(),
        None => return,
    };
    if inbox.is_empty() {
        return;
    }
    debug!(count = inbox.len(), "delivering host signals");

    let mut signals = Vec::new();
    world.resource_scope(|world, mut rebellion: Mut<Rebellion>| {
        world.resource_scope(|world, mut rng: Mut<SimRng>| {
            let mut campaign = world.resource_mut::<Campaign>();
            let mut ctx = TickContext {
                world: &mut campaign.0,
                rng: &mut rng.rng,
                signals: &mut signals,
                inbox: &inbox,
            };
            rebellion.0.handle_signals(&mut ctx);
        });
    });
    notify(world, signals);
}

fn notify(world: &mut World, signals: Vec<Signal>) {
    if signals.is_empty() {
        return;
    }
    if let Some(mut messages) = world.get_resource_mut::<Messages<CampaignNotification>>() {
        messages.write_batch(signals.into_iter().map(CampaignNotification));
    }
}
