use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use super::context::TickContext;
use super::signal::Signal;
use super::system::{SimSystem, TickFrequency};
use crate::model::timestamp::HOURS_PER_DAY;
use crate::model::{CampaignWorld, SimTimestamp};
use crate::persist::file::{write_jsonl, write_store};
use crate::persist::{PersistError, SaveStore};

/// Configuration for a simulation run.
pub struct SimConfig {
    pub start_year: u32,
    pub num_days: u32,
    pub seed: u64,
    /// If set, checkpoint system state every N days.
    pub checkpoint_interval: Option<u32>,
    /// Directory to write checkpoints into.
    pub output_dir: Option<PathBuf>,
}

impl SimConfig {
    pub fn new(start_year: u32, num_days: u32, seed: u64) -> Self {
        Self {
            start_year,
            num_days,
            seed,
            checkpoint_interval: None,
            output_dir: None,
        }
    }
}

/// Returns true if a system with the given frequency should fire at this timestamp.
pub fn should_fire(freq: TickFrequency, time: SimTimestamp) -> bool {
    match freq {
        TickFrequency::Hourly => true,
        TickFrequency::Daily => time.is_day_start(),
    }
}

/// Set `world.current_time` and call each system whose frequency matches.
///
/// Signal delivery is **single-pass, non-cascading**:
///
/// 1. **Phase 1 (tick):** Each system's `tick()` runs in registration order.
///    All signals emitted during this phase are collected into a shared buffer.
/// 2. **Phase 2 (react):** If any signals were emitted, each system's
///    `handle_signals()` is called with the full signal buffer as `ctx.inbox`.
///    Signals pushed during this phase are not delivered again.
///
/// Returns every signal emitted in either phase, in emission order, so the
/// host can observe the day's notifications.
pub fn dispatch_systems(
    world: &mut CampaignWorld,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    time: SimTimestamp,
) -> Vec<Signal> {
    world.current_time = time;

    // Phase 1: tick systems, collecting signals
    let mut signals = Vec::new();
    for system in systems.iter_mut() {
        if should_fire(system.frequency(), time) {
            let mut ctx = TickContext {
                world,
                rng,
                signals: &mut signals,
                inbox: &[],
            };
            system.tick(&mut ctx);
        }
    }

    // Phase 2: deliver signals for reaction (only if any were emitted)
    if !signals.is_empty() {
        let reactions = react(world, systems, rng, &signals, Some(time));
        signals.extend(reactions);
    }
    signals
}

/// Deliver signals raised outside the tick loop (by the host) to every system.
///
/// Returns the signals systems emitted while reacting.
pub fn deliver_signals(
    world: &mut CampaignWorld,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    inbox: &[Signal],
) -> Vec<Signal> {
    react(world, systems, rng, inbox, None)
}

fn react(
    world: &mut CampaignWorld,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    inbox: &[Signal],
    time: Option<SimTimestamp>,
) -> Vec<Signal> {
    let mut emitted = Vec::new();
    for system in systems.iter_mut() {
        if time.is_none_or(|t| should_fire(system.frequency(), t)) {
            let mut ctx = TickContext {
                world,
                rng,
                signals: &mut emitted,
                inbox,
            };
            system.handle_signals(&mut ctx);
        }
    }
    emitted
}

/// Collect every system's durable state into one store.
pub fn save_systems(systems: &[Box<dyn SimSystem>]) -> Result<SaveStore, PersistError> {
    let mut store = SaveStore::new();
    for system in systems {
        system.save(&mut store)?;
    }
    Ok(store)
}

/// Run the simulation for the configured number of days.
///
/// Creates a deterministic RNG from `config.seed`, so the same seed always
/// produces the same campaign. Iterates hourly only when some system needs it.
/// Returns every signal emitted over the run.
pub fn run(
    world: &mut CampaignWorld,
    systems: &mut [Box<dyn SimSystem>],
    config: SimConfig,
) -> Result<Vec<Signal>, PersistError> {
    let mut log = Vec::new();
    let Some(finest) = systems.iter().map(|s| s.frequency()).max() else {
        return Ok(log);
    };

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let start = SimTimestamp::from_year(config.start_year);
    let steps_per_day = match finest {
        TickFrequency::Daily => 1,
        TickFrequency::Hourly => HOURS_PER_DAY,
    };

    for day_offset in 0..config.num_days {
        let day_start = start.plus_days(day_offset);
        for step in 0..steps_per_day {
            let time = day_start.plus_hours(step);
            log.extend(dispatch_systems(world, systems, &mut rng, time));
        }

        // Checkpoint at configured interval
        if let (Some(interval), Some(dir)) = (config.checkpoint_interval, &config.output_dir) {
            let is_last_day = day_offset + 1 == config.num_days;
            if is_last_day || (day_offset + 1).is_multiple_of(interval) {
                let checkpoint_dir = dir.join(format!("day_{:06}", day_offset + 1));
                debug!(day = day_offset + 1, dir = %checkpoint_dir.display(), "writing checkpoint");
                write_store(&save_systems(systems)?, &checkpoint_dir.join("state.json"))?;
                write_jsonl(&checkpoint_dir.join("signals.jsonl"), log.iter())?;
            }
        }
    }
    Ok(log)
}
