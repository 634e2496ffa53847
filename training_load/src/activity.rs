use std::time::Duration;

use heart_rate::HrZone;
use time::{Date, PrimitiveDateTime};

/// Completed exercise session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRecord {
    pub name: String,
    /// Average heart rate in bpm. `0` means the rate is unknown
    pub average_heart_rate: u8,
    pub duration: Duration,
    /// Start of the session, already resolved to the user's timezone
    pub start: PrimitiveDateTime,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<HrZone>,
    /// Distance in meters
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: Option<u64>,
}

impl ActivityRecord {
    pub fn new(
        name: impl Into<String>,
        average_heart_rate: u8,
        duration: Duration,
        start: PrimitiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            average_heart_rate,
            duration,
            start,
            zones: Vec::new(),
            distance: None,
            steps: None,
        }
    }

    pub fn with_zones(mut self, zones: impl IntoIterator<Item = HrZone>) -> Self {
        self.zones = zones.into_iter().collect();
        self
    }

    pub fn calendar_day(&self) -> Date {
        self.start.date()
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration.as_secs_f64() / 60.0
    }

    pub const fn is_heart_rate_known(&self) -> bool {
        self.average_heart_rate > 0
    }

    /// Minutes spent in exercising zones (Aerobic and above).
    pub fn exercising_minutes(&self) -> f64 {
        self.zones
            .iter()
            .filter(|zone| {
                heart_rate::ZoneKind::ALL
                    .into_iter()
                    .any(|kind| kind.is_exercising() && kind.name() == zone.name)
            })
            .map(|zone| zone.minutes)
            .sum()
    }
}
