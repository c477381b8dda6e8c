//! Year grid construction
//!
//! Turns a sparse [`ActivityMap`] into a fixed 53x7 [`YearGrid`] starting at
//! the year's first Monday. The grid always holds 371 days, so it runs past
//! Dec 31 into the next year; those trailing cells are kept for a stable
//! column count.

use std::borrow::Cow;

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::Serialize;

use super::calendar::start_date;
use super::intensity::IntensityBucket;
use super::plural::format_count;
use super::stats::YearStats;
use super::synthetic;
use crate::types::{
    ActivityMap, CommitmapError, DayCell, Result, WeekColumn, YearGrid, DAYS_PER_WEEK, GRID_DAYS,
    GRID_WEEKS,
};

/// Build the grid of [`GRID_DAYS`] consecutive days beginning at `start`.
///
/// `start` need not be a Monday: `column` is the position within the
/// week column, not the calendar weekday.
pub fn build_grid(start: NaiveDate, activity: &ActivityMap) -> Result<YearGrid> {
    let mut weeks = Vec::with_capacity(GRID_WEEKS);

    for week in 0..GRID_WEEKS {
        let mut days = [DayCell {
            date: start,
            count: 0,
            column: 0,
        }; DAYS_PER_WEEK];

        for (column, cell) in days.iter_mut().enumerate() {
            let position = (week * DAYS_PER_WEEK + column) as u64;
            let date = start
                .checked_add_days(Days::new(position))
                .ok_or_else(|| {
                    CommitmapError::DateOutOfRange(format!("{} + {} days", start, position))
                })?;

            *cell = DayCell {
                date,
                count: activity.get(date),
                column: column as u8,
            };
        }

        weeks.push(WeekColumn::new(days));
    }

    Ok(YearGrid::from_weeks(weeks))
}

/// Activity for `year`: `supplied` when it has entries, generated otherwise.
/// An empty map counts as no data.
pub fn year_activity<'a, R: Rng + ?Sized>(
    year: i32,
    supplied: Option<&'a ActivityMap>,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Cow<'a, ActivityMap>> {
    match supplied.filter(|m| !m.is_empty()) {
        Some(activity) => Ok(Cow::Borrowed(activity)),
        None => synthetic::generate(year, today, rng).map(Cow::Owned),
    }
}

/// Grid for `year` over [`year_activity`]
pub fn year_grid<R: Rng + ?Sized>(
    year: i32,
    supplied: Option<&ActivityMap>,
    today: NaiveDate,
    rng: &mut R,
) -> Result<YearGrid> {
    let start = start_date(year)?;
    let activity = year_activity(year, supplied, today, rng)?;
    build_grid(start, &activity)
}

/// Grid plus statistics for one year, both read from the same activity
#[derive(Debug, Clone)]
pub struct YearSummary {
    pub grid: YearGrid,
    pub stats: YearStats,
}

/// Like [`year_grid`], also summarizing the whole calendar year
pub fn year_summary<R: Rng + ?Sized>(
    year: i32,
    supplied: Option<&ActivityMap>,
    today: NaiveDate,
    rng: &mut R,
) -> Result<YearSummary> {
    let start = start_date(year)?;
    let activity = year_activity(year, supplied, today, rng)?;
    Ok(YearSummary {
        grid: build_grid(start, &activity)?,
        stats: YearStats::from_activity(year, &activity)?,
    })
}

/// Display record for one cell: what a renderer or tooltip needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellSummary {
    pub date: NaiveDate,
    pub count: u32,
    pub column: u8,
    pub bucket: IntensityBucket,
    /// Count with agreeing noun, e.g. "5 коммитов"
    pub label: String,
}

impl CellSummary {
    pub fn from_cell(cell: &DayCell) -> Self {
        Self {
            date: cell.date,
            count: cell.count,
            column: cell.column,
            bucket: IntensityBucket::classify(i64::from(cell.count)),
            label: format_count(u64::from(cell.count)),
        }
    }

    /// Tooltip line, e.g. "5 коммитов · 2025-01-10"
    pub fn tooltip(&self) -> String {
        format!("{} · {}", self.label, self.date)
    }
}

/// Serializable view of a whole grid
#[derive(Debug, Clone, Serialize)]
pub struct GridReport {
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weeks: Vec<Vec<CellSummary>>,
}

impl GridReport {
    pub fn from_grid(grid: &YearGrid) -> Self {
        Self {
            year: grid.year(),
            start: grid.start(),
            end: grid.end(),
            weeks: grid
                .weeks()
                .iter()
                .map(|week| week.iter().map(CellSummary::from_cell).collect())
                .collect(),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }
}
