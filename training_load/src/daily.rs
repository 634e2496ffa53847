use std::collections::BTreeMap;

use time::Date;

use crate::{ActivityRecord, UserProfile, trimp};

/// Sum of TRIMP for every activity that falls on `day`.
///
/// Activities filed under a different calendar day are skipped.
pub fn daily_trimp<'a>(
    day: Date,
    activities: impl IntoIterator<Item = &'a ActivityRecord>,
    profile: &UserProfile,
) -> f64 {
    activities
        .into_iter()
        .filter(|activity| {
            if activity.calendar_day() == day {
                return true;
            }

            tracing::warn!(
                %day,
                activity = %activity.name,
                start = %activity.start,
                "activity does not belong to the requested day, skipping"
            );
            false
        })
        .map(|activity| trimp(activity, profile))
        .sum()
}

/// Group activities by the calendar day they started on.
pub fn group_by_day(
    activities: impl IntoIterator<Item = ActivityRecord>,
) -> BTreeMap<Date, Vec<ActivityRecord>> {
    activities
        .into_iter()
        .fold(BTreeMap::new(), |mut days, activity| {
            days.entry(activity.calendar_day())
                .or_default()
                .push(activity);
            days
        })
}
