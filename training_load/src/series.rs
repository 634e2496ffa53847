use std::collections::BTreeMap;

use time::Date;

use crate::{ActivityRecord, LoadError, UserProfile, daily_trimp};

pub const ACUTE_DAYS: f64 = 7.0;
pub const CHRONIC_DAYS: f64 = 42.0;
const MIN_WINDOW_DAYS: f64 = 1.0;

/// Training load of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyScore {
    pub date: Date,
    pub trimp: f64,
    pub acl: f64,
    pub ctl: f64,
    pub tsb: f64,
}

impl DailyScore {
    /// Acute:chronic workload ratio. `None` while there is no chronic load
    pub fn acwr(&self) -> Option<f64> {
        match self.ctl > 0.0 {
            true => Some(self.acl / self.ctl),
            false => None,
        }
    }

    pub const fn state(&self) -> LoadState {
        LoadState {
            acl: self.acl,
            ctl: self.ctl,
        }
    }
}

/// Running acute and chronic load accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadState {
    pub acl: f64,
    pub ctl: f64,
}

impl LoadState {
    /// First day of a mesocycle has no history to average against.
    pub const fn seed(trimp: f64) -> Self {
        Self {
            acl: trimp,
            ctl: trimp,
        }
    }

    pub fn advance(self, trimp: f64, tau_acute: f64, tau_chronic: f64) -> Self {
        Self {
            acl: self.acl + (trimp - self.acl) / tau_acute,
            ctl: self.ctl + (trimp - self.ctl) / tau_chronic,
        }
    }

    pub fn tsb(&self) -> f64 {
        self.ctl - self.acl
    }

    pub fn score(self, date: Date, trimp: f64) -> DailyScore {
        DailyScore {
            date,
            trimp,
            acl: self.acl,
            ctl: self.ctl,
            tsb: self.tsb(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Time constant of the acute load in days
    pub acute_days: f64,
    /// Time constant of the chronic load when the profile has no mesocycle length
    pub default_chronic_days: f64,
}

impl LoadOptions {
    pub const fn new() -> Self {
        Self {
            acute_days: ACUTE_DAYS,
            default_chronic_days: CHRONIC_DAYS,
        }
    }

    pub const fn set_acute_days(mut self, acute_days: f64) -> Self {
        self.acute_days = acute_days;
        self
    }

    pub const fn set_default_chronic_days(mut self, default_chronic_days: f64) -> Self {
        self.default_chronic_days = default_chronic_days;
        self
    }

    /// `(tau_acute, tau_chronic)` for a profile. Each window is at least one day
    pub fn time_constants(&self, profile: &UserProfile) -> (f64, f64) {
        let chronic = profile
            .chronic_days()
            .unwrap_or(self.default_chronic_days);

        (window(self.acute_days), window(chronic))
    }
}

fn window(days: f64) -> f64 {
    if days >= MIN_WINDOW_DAYS {
        return days;
    }

    tracing::warn!(days, "load window is shorter than one day, using one day");
    MIN_WINDOW_DAYS
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Daily scores ordered by date.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Vec<DailyScore>", from = "Vec<DailyScore>")
)]
pub struct LoadSeries(BTreeMap<Date, DailyScore>);

impl LoadSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: Date) -> Option<&DailyScore> {
        self.0.get(&date)
    }

    pub fn first(&self) -> Option<&DailyScore> {
        self.0.first_key_value().map(|(_, score)| score)
    }

    pub fn latest(&self) -> Option<&DailyScore> {
        self.0.last_key_value().map(|(_, score)| score)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DailyScore> + '_ {
        self.0.values()
    }

    pub fn range(
        &self,
        range: impl std::ops::RangeBounds<Date>,
    ) -> impl DoubleEndedIterator<Item = &DailyScore> + '_ {
        self.0.range(range).map(|(_, score)| score)
    }

    pub fn state_at(&self, date: Date) -> Option<LoadState> {
        self.get(date).map(DailyScore::state)
    }
}

impl FromIterator<DailyScore> for LoadSeries {
    fn from_iter<T: IntoIterator<Item = DailyScore>>(iter: T) -> Self {
        Self(iter.into_iter().map(|score| (score.date, score)).collect())
    }
}

impl From<Vec<DailyScore>> for LoadSeries {
    fn from(value: Vec<DailyScore>) -> Self {
        value.into_iter().collect()
    }
}

impl From<LoadSeries> for Vec<DailyScore> {
    fn from(LoadSeries(scores): LoadSeries) -> Self {
        scores.into_values().collect()
    }
}

impl IntoIterator for LoadSeries {
    type Item = DailyScore;
    type IntoIter = std::collections::btree_map::IntoValues<Date, DailyScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<'a> IntoIterator for &'a LoadSeries {
    type Item = &'a DailyScore;
    type IntoIter = std::collections::btree_map::Values<'a, Date, DailyScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

/// Training load for every day from `start` to `end` inclusive with default options.
pub fn compute_series(
    start: Date,
    end: Date,
    activities_by_day: &BTreeMap<Date, Vec<ActivityRecord>>,
    profile: &UserProfile,
) -> Result<LoadSeries, LoadError> {
    compute_series_with_options(start, end, activities_by_day, profile, &LoadOptions::new())
}

/// Training load for every day from `start` to `end` inclusive.
///
/// Days without an entry in `activities_by_day` are rest days.
pub fn compute_series_with_options(
    start: Date,
    end: Date,
    activities_by_day: &BTreeMap<Date, Vec<ActivityRecord>>,
    profile: &UserProfile,
    options: &LoadOptions,
) -> Result<LoadSeries, LoadError> {
    if end < start {
        return Err(LoadError::InvertedRange { start, end });
    }

    let (tau_acute, tau_chronic) = options.time_constants(profile);

    tracing::debug!(%start, %end, tau_acute, tau_chronic, "computing training load series");

    let days = std::iter::successors(Some(start), |day| day.next_day())
        .take_while(|day| *day <= end);

    let series = days
        .scan(None::<LoadState>, |state, day| {
            let trimp = activities_by_day
                .get(&day)
                .map(|activities| daily_trimp(day, activities, profile))
                .unwrap_or(0.0);

            let next = match *state {
                Some(previous) => previous.advance(trimp, tau_acute, tau_chronic),
                None => LoadState::seed(trimp),
            };
            *state = Some(next);

            Some(next.score(day, trimp))
        })
        .collect::<LoadSeries>();

    tracing::debug!(days = series.len(), "training load series computed");

    Ok(series)
}
