use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use crate::model::SimTimestamp;

/// Simulation clock resource tracking the current campaign time and tick count.
///
/// Advances by one hour per tick. The `advance_clock` system moves the clock
/// forward at the end of each tick (in `SimPhase::Last`), so systems see the
/// current time before it advances.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimClock {
    pub time: SimTimestamp,
    pub tick_count: u64,
}

impl SimClock {
    pub fn new(start: SimTimestamp) -> Self {
        Self {
            time: start,
            tick_count: 0,
        }
    }

    /// Advance the clock by one hour.
    pub fn advance(&mut self) {
        self.time = self.time.plus_hours(1);
        self.tick_count += 1;
    }
}

/// Bevy system that advances the simulation clock by one hour.
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
