//! # Heart rate
//!
//! Physiological primitives used by training load scoring.
//!
//! - MHR - maximum heart rate
//! - RHR - resting heart rate
//! - THR - target heart rate
//! - HRR - heart rate reserve, `MHR - RHR`
//!
//! To calculate MHR we use following formula: `207 - (age) * 0.7`
//!
//! Target zones (fraction of HRR above RHR):
//!
//! - VO2 Max Zone(Max) - `0.9-1.0`
//! - Anaerobic Zone(Hard) - `0.8-0.9`
//! - Aerobic Zone(Moderate) - `0.7-0.8`
//! - Fat Burn Zone(Light) - `0.6-0.7`
//! - Warm Up Zone(Very Light) - `0.5-0.6`
//!
//! ```notrust
//! THR = [(MHR - RHR) x %Intensity] + RHR
//! ```
//!
//! Based on American Heart Association (AHA) [data](https://www.heart.org/en/healthy-living/fitness/fitness-basics/target-heart-rates).

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Exponential weighting of the Banister training impulse.
    pub const fn trimp_weight(self) -> f64 {
        match self {
            Sex::Male => 1.92,
            Sex::Female => 1.67,
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unknown sex `{other}`, expected `male` or `female`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneKind {
    VO2,
    Anaerobic,
    Aerobic,
    FatBurn,
    WarmUp,
    Resting,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 6] = [
        ZoneKind::Resting,
        ZoneKind::WarmUp,
        ZoneKind::FatBurn,
        ZoneKind::Aerobic,
        ZoneKind::Anaerobic,
        ZoneKind::VO2,
    ];

    /// Lower bound of the zone as a fraction of HRR.
    pub const fn intensity_coef(self) -> f64 {
        match self {
            ZoneKind::VO2 => 0.9,
            ZoneKind::Anaerobic => 0.8,
            ZoneKind::Aerobic => 0.7,
            ZoneKind::FatBurn => 0.6,
            ZoneKind::WarmUp => 0.5,
            ZoneKind::Resting => 0.0,
        }
    }

    /// Upper bound of the zone as a fraction of HRR.
    pub const fn upper_coef(self) -> f64 {
        match self {
            ZoneKind::VO2 => 1.0,
            ZoneKind::Anaerobic => 0.9,
            ZoneKind::Aerobic => 0.8,
            ZoneKind::FatBurn => 0.7,
            ZoneKind::WarmUp => 0.6,
            ZoneKind::Resting => 0.5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ZoneKind::VO2 => "Max",
            ZoneKind::Anaerobic => "Hard",
            ZoneKind::Aerobic => "Moderate",
            ZoneKind::FatBurn => "Light",
            ZoneKind::WarmUp => "Very Light",
            ZoneKind::Resting => "Resting",
        }
    }

    pub const fn is_exercising(self) -> bool {
        matches!(
            self,
            ZoneKind::VO2 | ZoneKind::Anaerobic | ZoneKind::Aerobic
        )
    }

    /// Classify a heart rate against the zones of a person.
    pub fn from_rate(mhr: f64, rhr: f64, rate: f64) -> Self {
        ZoneKind::ALL
            .into_iter()
            .rev()
            .find(|kind| rate >= thr(mhr, rhr, *kind).floor())
            .unwrap_or(ZoneKind::Resting)
    }
}

/// Heart rate zone with time spent in it.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HrZone {
    pub name: String,
    pub min_bpm: u8,
    pub max_bpm: u8,
    pub minutes: f64,
}

impl HrZone {
    pub fn contains(&self, rate: u8) -> bool {
        (self.min_bpm..=self.max_bpm).contains(&rate)
    }
}

/// Calculate MHR for age.
///
/// # Params
/// - `age` - person age in years
#[inline]
pub const fn mhr(age: u8) -> f64 {
    207.0 - (age as f64 * 0.7)
}

#[inline]
pub const fn thr(mhr: f64, rhr: f64, zone: ZoneKind) -> f64 {
    ((mhr - rhr) * zone.intensity_coef()) + rhr
}

/// Fraction of the heart rate reserve used at `rate`, clamped to `[0, 1]`.
///
/// Returns `0` when `mhr <= rhr` since the reserve is undefined.
#[inline]
pub fn reserve_ratio(rate: f64, rhr: f64, mhr: f64) -> f64 {
    let reserve = mhr - rhr;
    if reserve <= 0.0 || !reserve.is_finite() {
        return 0.0;
    }

    ((rate - rhr) / reserve).clamp(0.0, 1.0)
}

/// Zone table for a person with zero minutes recorded in every zone.
pub fn zones(mhr: f64, rhr: f64) -> Vec<HrZone> {
    ZoneKind::ALL
        .into_iter()
        .map(|kind| {
            let min = match kind {
                ZoneKind::Resting => 0.0,
                _ => thr(mhr, rhr, kind).floor(),
            };
            let max = ((mhr - rhr) * kind.upper_coef() + rhr).floor() - 1.0;
            let max = match kind {
                ZoneKind::VO2 => mhr.floor(),
                _ => max,
            };

            HrZone {
                name: kind.name().to_owned(),
                min_bpm: min.clamp(0.0, u8::MAX as f64) as u8,
                max_bpm: max.clamp(0.0, u8::MAX as f64) as u8,
                minutes: 0.0,
            }
        })
        .collect()
}
