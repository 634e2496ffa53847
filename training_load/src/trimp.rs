use crate::{ActivityRecord, UserProfile};

/// Scaling of the Banister impulse.
pub const INTENSITY_FACTOR: f64 = 0.64;

/// Banister training impulse of a single session.
///
/// ```notrust
/// HRR% = (avg HR - RHR) / (MHR - RHR), clamped to [0, 1]
/// TRIMP = minutes x HRR% x 0.64 x e^(k x HRR%)
/// ```
///
/// Degrades to `0` instead of failing when the session has no duration,
/// the average heart rate is unknown or the profile has no heart rate reserve.
pub fn trimp(activity: &ActivityRecord, profile: &UserProfile) -> f64 {
    let minutes = activity.duration_minutes();
    if minutes <= 0.0 {
        return 0.0;
    }

    if !activity.is_heart_rate_known() {
        tracing::warn!(
            activity = %activity.name,
            start = %activity.start,
            "unknown average heart rate, session does not contribute to load"
        );
        return 0.0;
    }

    if !profile.has_valid_heart_rate_reserve() {
        tracing::warn!(
            resting = profile.resting_heart_rate,
            max = profile.max_heart_rate,
            "maximum heart rate is not above resting heart rate"
        );
        return 0.0;
    }

    let ratio = heart_rate::reserve_ratio(
        f64::from(activity.average_heart_rate),
        profile.resting_heart_rate,
        profile.max_heart_rate,
    );

    minutes * ratio * INTENSITY_FACTOR * (profile.sex.trimp_weight() * ratio).exp()
}
