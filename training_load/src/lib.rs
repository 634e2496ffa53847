//! # Training load
//!
//! Turns exercise sessions into training load metrics:
//!
//! - TRIMP - Banister training impulse of a single session
//! - ACL - acute training load, 7 day exponentially weighted average of daily TRIMP
//! - CTL - chronic training load, mesocycle long exponentially weighted average of daily TRIMP
//! - TSB - training stress balance, `CTL - ACL`
//!
//! ```notrust
//! TRIMP = minutes x HRR% x 0.64 x e^(k x HRR%)
//! ACL[d] = ACL[d-1] + (TRIMP[d] - ACL[d-1]) / 7
//! CTL[d] = CTL[d-1] + (TRIMP[d] - CTL[d-1]) / mesocycle_length
//! ```
//!
//! Where `k` is `1.92` for males and `1.67` for females.

mod activity;
#[cfg(feature = "csv")]
mod csv_source;
mod daily;
mod error;
mod profile;
mod series;
mod simulation;
mod source;
mod trimp;

pub use self::activity::*;
#[cfg(feature = "csv")]
pub use self::csv_source::*;
pub use self::daily::*;
pub use self::error::*;
pub use self::profile::*;
pub use self::series::*;
pub use self::simulation::*;
pub use self::source::*;
pub use self::trimp::*;

pub use heart_rate::{HrZone, Sex};

/// Parse `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<time::Date, time::error::Parse> {
    time::Date::parse(
        value.trim(),
        time::macros::format_description!("[year]-[month]-[day]"),
    )
}
