use bevy_ecs::system::Res;

use super::clock::SimClock;
use crate::model::SimTimestamp;

fn daily_check(time: SimTimestamp) -> bool {
    time.is_day_start()
}

/// Run condition: true on the first tick of each campaign day.
pub fn daily(clock: Res<SimClock>) -> bool {
    daily_check(clock.time)
}
