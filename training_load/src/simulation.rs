use time::Date;

use crate::{
    ActivityRecord, DailyScore, LoadError, LoadOptions, LoadSeries, LoadState, UserProfile,
    daily_trimp,
};

/// Score `sim_date` would get with `sim_activities`, extending `history` by one day.
///
/// `history` is never modified. Empty `sim_activities` projects a rest day.
pub fn project(
    sim_date: Date,
    sim_activities: &[ActivityRecord],
    history: &LoadSeries,
    profile: &UserProfile,
) -> Result<DailyScore, LoadError> {
    project_with_options(
        sim_date,
        sim_activities,
        history,
        profile,
        &LoadOptions::new(),
    )
}

pub fn project_with_options(
    sim_date: Date,
    sim_activities: &[ActivityRecord],
    history: &LoadSeries,
    profile: &UserProfile,
    options: &LoadOptions,
) -> Result<DailyScore, LoadError> {
    let last = history.latest().ok_or(LoadError::EmptyHistory)?;

    if last.date >= sim_date {
        return Err(LoadError::SimulationNotAfterHistory {
            last: last.date,
            sim_date,
        });
    }

    if last.date.next_day() != Some(sim_date) {
        tracing::warn!(
            last = %last.date,
            %sim_date,
            "gap between history and simulated day, projecting from the latest known load"
        );
    }

    let seed = match history.len() {
        1 => LoadState::seed(last.trimp),
        _ => last.state(),
    };

    let (tau_acute, tau_chronic) = options.time_constants(profile);
    let trimp = daily_trimp(sim_date, sim_activities, profile);

    tracing::debug!(%sim_date, trimp, acl = seed.acl, ctl = seed.ctl, "projecting simulated day");

    Ok(seed
        .advance(trimp, tau_acute, tau_chronic)
        .score(sim_date, trimp))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{collections::BTreeMap, time::Duration};

    use heart_rate::Sex;
    use time::macros::{date, datetime};

    use crate::compute_series;

    fn profile() -> UserProfile {
        UserProfile::new(Sex::Male, 30, 60.0)
            .set_max_heart_rate(190.0)
            .set_mesocycle_length(42)
    }

    fn run(start: time::PrimitiveDateTime, heart_rate: u8, minutes: u64) -> ActivityRecord {
        ActivityRecord::new("Run", heart_rate, Duration::from_secs(minutes * 60), start)
    }

    fn history(end: Date) -> (BTreeMap<Date, Vec<ActivityRecord>>, LoadSeries) {
        let activities = BTreeMap::from([
            (
                date!(2024 - 01 - 01),
                vec![run(datetime!(2024-01-01 08:00:00), 150, 60)],
            ),
            (
                date!(2024 - 01 - 03),
                vec![
                    run(datetime!(2024-01-03 07:00:00), 140, 40),
                    run(datetime!(2024-01-03 18:00:00), 170, 20),
                ],
            ),
        ]);
        let series = compute_series(date!(2024 - 01 - 01), end, &activities, &profile()).unwrap();

        (activities, series)
    }

    #[test]
    fn test_rest_day_matches_series() {
        let (_, history) = history(date!(2024 - 01 - 01));
        let (_, expected) = history_with_rest_day();

        let projected = project(date!(2024 - 01 - 02), &[], &history, &profile()).unwrap();

        assert_eq!(projected.trimp, 0.0);
        assert!((projected.acl - expected.acl).abs() < 1e-9);
        assert!((projected.ctl - expected.ctl).abs() < 1e-9);
        assert!((projected.tsb - expected.tsb).abs() < 1e-9);
        assert!((projected.tsb - 11.96).abs() < 0.01);
    }

    fn history_with_rest_day() -> (LoadSeries, DailyScore) {
        let (_, series) = history(date!(2024 - 01 - 02));
        let score = *series.get(date!(2024 - 01 - 02)).unwrap();

        (series, score)
    }

    #[test]
    fn test_matches_full_recompute() {
        let (mut activities, history) = history(date!(2024 - 01 - 10));
        let sim_date = date!(2024 - 01 - 11);
        let planned = vec![run(datetime!(2024-01-11 06:30:00), 160, 50)];

        let projected = project(sim_date, &planned, &history, &profile()).unwrap();

        activities.insert(sim_date, planned);
        let recomputed = compute_series(date!(2024 - 01 - 01), sim_date, &activities, &profile())
            .unwrap();
        let expected = recomputed.get(sim_date).unwrap();

        assert_eq!(projected.date, sim_date);
        assert!((projected.trimp - expected.trimp).abs() < 1e-9);
        assert!((projected.acl - expected.acl).abs() < 1e-9);
        assert!((projected.ctl - expected.ctl).abs() < 1e-9);
        assert!(projected.trimp > 0.0);
    }

    #[test]
    fn test_history_is_untouched() {
        let (_, history) = history(date!(2024 - 01 - 10));
        let before = history.clone();
        let planned = [run(datetime!(2024-01-11 06:30:00), 160, 50)];

        let first = project(date!(2024 - 01 - 11), &planned, &history, &profile()).unwrap();
        let second = project(date!(2024 - 01 - 11), &planned, &history, &profile()).unwrap();

        assert_eq!(first, second);
        assert_eq!(history, before);
        assert_eq!(history.get(date!(2024 - 01 - 11)), None);
    }

    #[test]
    fn test_rest_day_decays() {
        let (_, history) = history(date!(2024 - 01 - 10));
        let last = *history.latest().unwrap();

        let projected = project(date!(2024 - 01 - 11), &[], &history, &profile()).unwrap();

        assert!(projected.acl < last.acl);
        assert!(projected.ctl < last.ctl);
        assert!(projected.acl > 0.0);
    }

    #[test]
    fn test_single_day_history_seeds_from_trimp() {
        let history = LoadSeries::from(vec![DailyScore {
            date: date!(2024 - 01 - 01),
            trimp: 70.0,
            acl: 10.0,
            ctl: 20.0,
            tsb: 10.0,
        }]);

        let projected = project(date!(2024 - 01 - 02), &[], &history, &profile()).unwrap();

        assert!((projected.acl - 60.0).abs() < 1e-9);
        assert!((projected.ctl - (70.0 - 70.0 / 42.0)).abs() < 1e-9);
        assert!((projected.ctl - 68.33).abs() < 0.01);
    }

    #[test]
    fn test_zero_acute_window_stays_finite() {
        let history = LoadSeries::from(vec![
            LoadState::seed(70.0).score(date!(2024 - 01 - 01), 70.0),
        ]);
        let options = LoadOptions::new().set_acute_days(0.0);

        let projected =
            project_with_options(date!(2024 - 01 - 02), &[], &history, &profile(), &options)
                .unwrap();

        assert_eq!(projected.acl, 0.0);
        assert!(projected.ctl.is_finite() && projected.ctl > 0.0);
    }

    #[test]
    fn test_empty_history() {
        let result = project(date!(2024 - 01 - 01), &[], &LoadSeries::new(), &profile());
        assert!(matches!(result, Err(LoadError::EmptyHistory)));
    }

    #[test]
    fn test_date_not_after_history() {
        let (_, history) = history(date!(2024 - 01 - 10));

        for sim_date in [date!(2024 - 01 - 10), date!(2024 - 01 - 05)] {
            let result = project(sim_date, &[], &history, &profile());
            assert!(matches!(
                result,
                Err(LoadError::SimulationNotAfterHistory { .. })
            ));
        }
    }

    #[test]
    fn test_gap_uses_latest_state() {
        let (_, history) = history(date!(2024 - 01 - 10));
        let last = history.latest().unwrap().state();

        let projected = project(date!(2024 - 01 - 15), &[], &history, &profile()).unwrap();

        assert!((projected.acl - last.advance(0.0, 7.0, 42.0).acl).abs() < 1e-9);
        assert!((projected.ctl - last.advance(0.0, 7.0, 42.0).ctl).abs() < 1e-9);
    }
}
