use serde::{Deserialize, Serialize};

/// Days over which the post-rebellion loyalty boost fades to nothing.
pub const BOOST_FADE_DAYS: f64 = 30.0;

/// Loyalty thresholds the rebellion engine reads from the host's settlement
/// loyalty model.
pub trait SettlementLoyaltyModel: Send + Sync {
    /// Towns at or below this loyalty are flagged as rebellious.
    fn rebellious_state_start_loyalty_threshold(&self) -> i32;
    /// Towns at or below this loyalty may rise up.
    fn rebellion_start_loyalty_threshold(&self) -> i32;
    /// Daily loyalty gain for a rebel-held town on the day its clan is founded.
    fn loyalty_boost_after_rebellion_start_value(&self) -> f64;
}

/// Fixed thresholds, loaded from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoyaltyThresholds {
    pub rebellious_state_threshold: i32,
    pub rebellion_start_threshold: i32,
    pub loyalty_boost_after_rebellion: f64,
}

impl Default for LoyaltyThresholds {
    fn default() -> Self {
        Self {
            rebellious_state_threshold: 25,
            rebellion_start_threshold: 15,
            loyalty_boost_after_rebellion: 5.0,
        }
    }
}

impl SettlementLoyaltyModel for LoyaltyThresholds {
    fn rebellious_state_start_loyalty_threshold(&self) -> i32 {
        self.rebellious_state_threshold
    }

    fn rebellion_start_loyalty_threshold(&self) -> i32 {
        self.rebellion_start_threshold
    }

    fn loyalty_boost_after_rebellion_start_value(&self) -> f64 {
        self.loyalty_boost_after_rebellion
    }
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`,
/// clamping `value` to the input range first.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
    out_min + (out_max - out_min) * t
}

/// Loyalty added to a rebel-held town whose clan is `days_since_creation` old.
/// Starts at the model's boost and fades to zero over thirty days.
pub fn post_rebellion_boost(model: &dyn SettlementLoyaltyModel, days_since_creation: i32) -> f64 {
    remap(
        f64::from(days_since_creation - 1),
        0.0,
        BOOST_FADE_DAYS,
        model.loyalty_boost_after_rebellion_start_value(),
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boost_fades_over_thirty_days() {
        let model = LoyaltyThresholds::default();
        assert!((post_rebellion_boost(&model, 1) - 5.0).abs() < 1e-9);
        assert!((post_rebellion_boost(&model, 16) - 2.5).abs() < 1e-9);
        assert!(post_rebellion_boost(&model, 31).abs() < 1e-9);
    }

    #[test]
    fn boost_is_clamped_outside_fade_window() {
        let model = LoyaltyThresholds::default();
        assert!(post_rebellion_boost(&model, 400).abs() < 1e-9);
        assert!((post_rebellion_boost(&model, -3) - 5.0).abs() < 1e-9);
    }
}
