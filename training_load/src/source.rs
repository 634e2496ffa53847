use std::{collections::BTreeMap, convert::Infallible};

use time::Date;

use crate::{
    ActivityRecord, LoadError, LoadOptions, LoadSeries, UserProfile, compute_series_with_options,
};

/// Supplies activities already resolved to calendar days.
pub trait ActivityDataSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Activities of every day in `from..=to`. Days without activities may be absent
    fn activities(
        &self,
        from: Date,
        to: Date,
    ) -> Result<BTreeMap<Date, Vec<ActivityRecord>>, Self::Error>;
}

pub trait UserProfileProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn profile(&self) -> Result<UserProfile, Self::Error>;
}

impl ActivityDataSource for BTreeMap<Date, Vec<ActivityRecord>> {
    type Error = Infallible;

    fn activities(
        &self,
        from: Date,
        to: Date,
    ) -> Result<BTreeMap<Date, Vec<ActivityRecord>>, Self::Error> {
        if to < from {
            return Ok(BTreeMap::new());
        }

        Ok(self
            .range(from..=to)
            .map(|(day, activities)| (*day, activities.clone()))
            .collect())
    }
}

impl UserProfileProvider for UserProfile {
    type Error = Infallible;

    fn profile(&self) -> Result<UserProfile, Self::Error> {
        Ok(*self)
    }
}

/// Series from the mesocycle start up to `today`, where `today` is the profile's day index.
pub fn compute_to_date<S, P>(
    source: &S,
    provider: &P,
    today: Date,
    options: &LoadOptions,
) -> Result<LoadSeries, LoadError>
where
    S: ActivityDataSource + ?Sized,
    P: UserProfileProvider + ?Sized,
{
    let profile = provider
        .profile()
        .map_err(|e| LoadError::Source(Box::new(e)))?;
    let start = profile.mesocycle_start(today);

    let activities = source
        .activities(start, today)
        .map_err(|e| LoadError::Source(Box::new(e)))?;

    compute_series_with_options(start, today, &activities, &profile, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use heart_rate::Sex;
    use time::macros::{date, datetime};

    use crate::compute_series;

    #[derive(Debug, thiserror::Error)]
    #[error("service unavailable")]
    struct Unavailable;

    #[derive(Debug)]
    struct Offline;

    impl ActivityDataSource for Offline {
        type Error = Unavailable;

        fn activities(
            &self,
            _from: Date,
            _to: Date,
        ) -> Result<BTreeMap<Date, Vec<ActivityRecord>>, Self::Error> {
            Err(Unavailable)
        }
    }

    fn activities() -> BTreeMap<Date, Vec<ActivityRecord>> {
        [
            datetime!(2024-02-25 08:00:00),
            datetime!(2024-03-02 08:00:00),
            datetime!(2024-03-05 08:00:00),
        ]
        .into_iter()
        .map(|start| {
            (
                start.date(),
                vec![ActivityRecord::new(
                    "Run",
                    150,
                    Duration::from_secs(3600),
                    start,
                )],
            )
        })
        .collect()
    }

    #[test]
    fn test_in_memory_range() {
        let source = activities();
        let days = source
            .activities(date!(2024 - 03 - 01), date!(2024 - 03 - 05))
            .unwrap();

        assert_eq!(days.len(), 2);
        assert!(!days.contains_key(&date!(2024 - 02 - 25)));
        assert!(
            source
                .activities(date!(2024 - 03 - 05), date!(2024 - 03 - 01))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_compute_to_date() {
        let profile = UserProfile::new(Sex::Female, 35, 55.0)
            .set_mesocycle_length(28)
            .set_day_index(5);
        let today = date!(2024 - 03 - 05);

        let series = compute_to_date(&activities(), &profile, today, &LoadOptions::new()).unwrap();
        let expected =
            compute_series(date!(2024 - 03 - 01), today, &activities(), &profile).unwrap();

        assert_eq!(series.len(), 5);
        assert_eq!(series, expected);
    }

    #[test]
    fn test_source_failure() {
        let profile = UserProfile::new(Sex::Male, 30, 60.0);
        let result = compute_to_date(&Offline, &profile, date!(2024 - 03 - 05), &LoadOptions::new());

        match result {
            Err(LoadError::Source(e)) => assert_eq!(e.to_string(), "service unavailable"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
