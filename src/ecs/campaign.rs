use bevy_ecs::message::Message;
use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;

use crate::model::CampaignWorld;
use crate::sim::{RebellionSystem, Signal};

/// The campaign state the rebellion engine reads and mutates.
#[derive(Resource, Debug)]
pub struct Campaign(pub CampaignWorld);

/// The installed rebellion engine and its durable state.
#[derive(Resource)]
pub struct Rebellion(pub RebellionSystem);

/// Deterministic RNG for the simulation.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

/// Host notification delivered to the engine (sieges, destroyed clans).
#[derive(Message, Clone, Debug, PartialEq)]
pub struct CampaignSignal(pub Signal);

/// Notification the engine raised for the host (state changes, finished
/// rebellions, new clans, matured kingdoms).
#[derive(Message, Clone, Debug, PartialEq)]
pub struct CampaignNotification(pub Signal);
