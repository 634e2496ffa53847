use heart_rate::Sex;
use time::{Date, Duration};

/// Person whose training load is tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserProfile {
    pub sex: Sex,
    /// Age in years
    pub age: u8,
    /// Resting heart rate in bpm
    pub resting_heart_rate: f64,
    /// Maximum heart rate in bpm
    pub max_heart_rate: f64,
    /// Length of the training block in days. Doubles as the chronic load window
    pub mesocycle_length: Option<u16>,
    /// Day within the mesocycle, starting from `1`
    pub day_index: u16,
}

impl UserProfile {
    /// Profile with maximum heart rate estimated from age.
    pub const fn new(sex: Sex, age: u8, resting_heart_rate: f64) -> Self {
        Self {
            sex,
            age,
            resting_heart_rate,
            max_heart_rate: heart_rate::mhr(age),
            mesocycle_length: None,
            day_index: 1,
        }
    }

    pub const fn set_max_heart_rate(mut self, max_heart_rate: f64) -> Self {
        self.max_heart_rate = max_heart_rate;
        self
    }

    pub const fn set_mesocycle_length(mut self, mesocycle_length: u16) -> Self {
        self.mesocycle_length = Some(mesocycle_length);
        self
    }

    pub const fn set_day_index(mut self, day_index: u16) -> Self {
        self.day_index = day_index;
        self
    }

    /// Chronic load window in days. `None` when the mesocycle length is unset or zero
    pub const fn chronic_days(&self) -> Option<f64> {
        match self.mesocycle_length {
            None | Some(0) => None,
            Some(days) => Some(days as f64),
        }
    }

    /// First day of the mesocycle given that `today` is day [`Self::day_index`].
    pub fn mesocycle_start(&self, today: Date) -> Date {
        let elapsed = self.day_index.saturating_sub(1);

        today.saturating_sub(Duration::days(i64::from(elapsed)))
    }

    pub fn has_valid_heart_rate_reserve(&self) -> bool {
        self.max_heart_rate > self.resting_heart_rate
    }
}
