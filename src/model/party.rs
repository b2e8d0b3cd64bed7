use serde::{Deserialize, Serialize};

use super::timestamp::SimTimestamp;
use super::troop::TroopRoster;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileParty {
    pub id: u64,
    pub name: String,
    pub leader: Option<u64>,
    pub clan: u64,
    pub is_lord_party: bool,
    /// Settlement the party is currently inside, if any.
    pub current_settlement: Option<u64>,
    pub members: TroopRoster,
    /// Movement AI stays off until this time.
    pub ai_disabled_until: Option<SimTimestamp>,
}

impl MobileParty {
    pub fn is_ai_enabled(&self, now: SimTimestamp) -> bool {
        self.ai_disabled_until.is_none_or(|until| now >= until)
    }

    pub fn disable_ai_for_hours(&mut self, now: SimTimestamp, hours: u32) {
        self.ai_disabled_until = Some(now.plus_hours(hours));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_grace_period_expires() {
        let now = SimTimestamp::new(1, 10, 8);
        let mut party = MobileParty {
            id: 1,
            name: "Warband".into(),
            leader: None,
            clan: 2,
            is_lord_party: true,
            current_settlement: None,
            members: TroopRoster::new(),
            ai_disabled_until: None,
        };
        assert!(party.is_ai_enabled(now));
        party.disable_ai_for_hours(now, 5);
        assert!(!party.is_ai_enabled(now.plus_hours(4)));
        assert!(party.is_ai_enabled(now.plus_hours(5)));
    }
}
