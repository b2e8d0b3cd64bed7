use std::fmt;

use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_YEAR: u32 = 360;

pub const HOURS_PER_YEAR: u32 = HOURS_PER_DAY * DAYS_PER_YEAR; // 8,640

/// Campaign time as total elapsed hours since year 0.
///
/// Calendar accessors are derived by division/modulo, so natural `u32`
/// ordering is chronological ordering. Serialized as `{year, day, hour}` so
/// save blobs stay readable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "TimestampRepr", from = "TimestampRepr")]
pub struct SimTimestamp(u32);

#[derive(Serialize, Deserialize)]
struct TimestampRepr {
    year: u32,
    day: u32,
    hour: u32,
}

impl From<SimTimestamp> for TimestampRepr {
    fn from(ts: SimTimestamp) -> Self {
        TimestampRepr {
            year: ts.year(),
            day: ts.day(),
            hour: ts.hour(),
        }
    }
}

impl From<TimestampRepr> for SimTimestamp {
    fn from(repr: TimestampRepr) -> Self {
        SimTimestamp::new(repr.year, repr.day, repr.hour)
    }
}

impl SimTimestamp {
    /// Create a timestamp from year, day-of-year (1–360), and hour (0–23).
    pub fn new(year: u32, day: u32, hour: u32) -> Self {
        assert!(
            (1..=DAYS_PER_YEAR).contains(&day),
            "day out of range: {day}"
        );
        assert!(hour < HOURS_PER_DAY, "hour out of range: {hour}");
        Self(year * HOURS_PER_YEAR + (day - 1) * HOURS_PER_DAY + hour)
    }

    /// Start of a year (day 1, hour 0).
    pub fn from_year(year: u32) -> Self {
        Self::new(year, 1, 0)
    }

    pub fn year(self) -> u32 {
        self.0 / HOURS_PER_YEAR
    }

    /// Day of year (1–360).
    pub fn day(self) -> u32 {
        (self.0 % HOURS_PER_YEAR) / HOURS_PER_DAY + 1
    }

    /// Hour of day (0–23).
    pub fn hour(self) -> u32 {
        self.0 % HOURS_PER_DAY
    }

    /// True at hour 0 of any day.
    pub fn is_day_start(self) -> bool {
        self.0.is_multiple_of(HOURS_PER_DAY)
    }

    pub fn plus_hours(self, hours: u32) -> Self {
        Self(self.0 + hours)
    }

    pub fn plus_days(self, days: u32) -> Self {
        Self(self.0 + days * HOURS_PER_DAY)
    }
}

impl Default for SimTimestamp {
    fn default() -> Self {
        Self::from_year(0)
    }
}

impl fmt::Display for SimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}.D{}.H{}", self.year(), self.day(), self.hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_accessors() {
        let ts = SimTimestamp::new(1084, 45, 13);
        assert_eq!(ts.year(), 1084);
        assert_eq!(ts.day(), 45);
        assert_eq!(ts.hour(), 13);
        assert!(!ts.is_day_start());
        assert!(SimTimestamp::new(1084, 45, 0).is_day_start());
    }

    #[test]
    fn hours_roll_over_days_and_years() {
        let ts = SimTimestamp::new(10, 360, 22).plus_hours(5);
        assert_eq!(ts, SimTimestamp::new(11, 1, 3));
        assert_eq!(SimTimestamp::new(5, 10, 20).plus_days(7), SimTimestamp::new(5, 17, 20));
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(SimTimestamp::new(1, 360, 23) < SimTimestamp::from_year(2));
        assert!(SimTimestamp::new(2, 1, 1) > SimTimestamp::from_year(2));
    }

    #[test]
    fn serde_uses_calendar_repr() {
        let ts = SimTimestamp::new(1084, 12, 6);
        let json = serde_json::to_value(ts).unwrap();
        assert_eq!(json, serde_json::json!({"year": 1084, "day": 12, "hour": 6}));
        let back: SimTimestamp = serde_json::from_value(json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn display_format() {
        assert_eq!(SimTimestamp::new(3, 7, 9).to_string(), "Y3.D7.H9");
    }
}
