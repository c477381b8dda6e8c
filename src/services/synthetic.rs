//! Fallback activity generator used when no real data is supplied

use chrono::{Datelike, NaiveDate};
use rand::Rng;

use crate::types::{ActivityMap, CommitmapError, Result};

/// Probability that a generated day has any commits
pub const ACTIVE_DAY_PROBABILITY: f64 = 0.7;

/// Inclusive range of commit counts on an active day
pub const MIN_SYNTHETIC_COMMITS: u32 = 1;
pub const MAX_SYNTHETIC_COMMITS: u32 = 19;

/// Generate one entry per day of `year`, stopping at `today` when `year`
/// is the current year. Inactive days are stored as explicit zeros.
pub fn generate<R: Rng + ?Sized>(year: i32, today: NaiveDate, rng: &mut R) -> Result<ActivityMap> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CommitmapError::InvalidYear(year))?;
    let dec31 = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(CommitmapError::InvalidYear(year))?;
    let last = if year == today.year() {
        dec31.min(today)
    } else {
        dec31
    };

    let mut map = ActivityMap::with_capacity(366);
    for date in first.iter_days().take_while(|d| *d <= last) {
        let count = if rng.gen_bool(ACTIVE_DAY_PROBABILITY) {
            rng.gen_range(MIN_SYNTHETIC_COMMITS..=MAX_SYNTHETIC_COMMITS)
        } else {
            0
        };
        map.insert(date, count);
    }

    tracing::debug!(year, days = map.len(), "generated synthetic activity");
    Ok(map)
}
