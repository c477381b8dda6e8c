//! Year summary statistics derived from daily activity

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::types::{ActivityMap, CommitmapError, Result, DAYS_PER_WEEK};

/// Weekday labels, Monday first (the grid's row order)
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearStats {
    pub year: i32,
    pub total_commits: u64,
    pub active_days: u32,
    pub busiest_day: Option<(NaiveDate, u32)>,
    pub longest_streak: u32,
    /// Length of the most recent run of active days
    pub current_streak: u32,
    /// Commit totals per weekday (Mon..Sun)
    pub weekday_totals: [u64; DAYS_PER_WEEK],
}

impl YearStats {
    /// Summarize every calendar day of `year`, Jan 1 through Dec 31.
    ///
    /// The grid starts on the first Monday, so its first columns can skip
    /// early January days; reading the map directly keeps them counted.
    pub fn from_activity(year: i32, activity: &ActivityMap) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CommitmapError::InvalidYear(year))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(CommitmapError::InvalidYear(year))?;

        let mut stats = Self {
            year,
            total_commits: 0,
            active_days: 0,
            busiest_day: None,
            longest_streak: 0,
            current_streak: 0,
            weekday_totals: [0; DAYS_PER_WEEK],
        };

        let mut run: u32 = 0;
        for date in first.iter_days().take_while(|d| *d <= last) {
            let count = activity.get(date);
            let weekday = date.weekday().num_days_from_monday() as usize;
            stats.total_commits = stats.total_commits.saturating_add(u64::from(count));
            stats.weekday_totals[weekday] += u64::from(count);

            if count == 0 {
                run = 0;
                continue;
            }

            stats.active_days += 1;
            run += 1;
            stats.longest_streak = stats.longest_streak.max(run);
            stats.current_streak = run;

            match stats.busiest_day {
                Some((_, max)) if count <= max => {}
                _ => stats.busiest_day = Some((date, count)),
            }
        }

        Ok(stats)
    }

    /// Average commits per active day (0 when there are none)
    pub fn average_per_active_day(&self) -> f64 {
        if self.active_days == 0 {
            0.0
        } else {
            self.total_commits as f64 / f64::from(self.active_days)
        }
    }

    /// Weekday with the most commits, if any commits exist
    pub fn busiest_weekday(&self) -> Option<&'static str> {
        let (idx, total) = self
            .weekday_totals
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))?;
        (*total > 0).then_some(WEEKDAY_LABELS[idx])
    }
}
