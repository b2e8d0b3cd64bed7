use serde::{Deserialize, Serialize};

/// A notification exchanged between simulation systems and the host.
///
/// `SiegeStarted` and `ClanDestroyed` come from the host; the rest are
/// emitted by the rebellion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// A siege was laid against a settlement.
    SiegeStarted { settlement_id: u64 },

    /// A clan was destroyed by the host.
    ClanDestroyed { clan_id: u64 },

    /// A town's rebellious flag flipped.
    RebelliousStateChanged { settlement_id: u64, rebellious: bool },

    /// An uprising finished and the settlement changed hands.
    RebellionFinished {
        settlement_id: u64,
        previous_owner_clan_id: u64,
    },

    /// A clan came into existence.
    ClanCreated { clan_id: u64, is_companion: bool },

    /// A rebel clan outgrew its rebel status at its home settlement.
    RebelClanMatured { settlement_id: u64, clan_id: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Signal::RebellionFinished {
            settlement_id: 4,
            previous_owner_clan_id: 9,
        })
        .unwrap();
        assert_eq!(json["type"], "rebellion_finished");
        assert_eq!(json["previous_owner_clan_id"], 9);
    }
}
