//! Fixed-shape heatmap grid types

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Days in a grid column
pub const DAYS_PER_WEEK: usize = 7;

/// Week columns in a year grid (always 53 for a stable width)
pub const GRID_WEEKS: usize = 53;

/// Total cells in a year grid
pub const GRID_DAYS: usize = GRID_WEEKS * DAYS_PER_WEEK;

/// A single day in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: u32,
    /// Position within the week column (0 = first day of the column)
    pub column: u8,
}

/// Seven consecutive days, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekColumn {
    days: [DayCell; DAYS_PER_WEEK],
}

impl WeekColumn {
    pub fn new(days: [DayCell; DAYS_PER_WEEK]) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[DayCell; DAYS_PER_WEEK] {
        &self.days
    }

    pub fn first(&self) -> &DayCell {
        &self.days[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayCell> {
        self.days.iter()
    }
}

/// 53 week columns covering 371 consecutive days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGrid {
    weeks: Vec<WeekColumn>,
}

impl YearGrid {
    /// Callers must supply exactly [`GRID_WEEKS`] chronological columns
    pub(crate) fn from_weeks(weeks: Vec<WeekColumn>) -> Self {
        debug_assert_eq!(weeks.len(), GRID_WEEKS);
        Self { weeks }
    }

    /// Calendar year the grid was built for (year of its first day)
    pub fn year(&self) -> i32 {
        self.start().year()
    }

    pub fn start(&self) -> NaiveDate {
        self.weeks[0].first().date
    }

    pub fn end(&self) -> NaiveDate {
        self.weeks[self.weeks.len() - 1].days()[DAYS_PER_WEEK - 1].date
    }

    pub fn weeks(&self) -> &[WeekColumn] {
        &self.weeks
    }

    /// All cells in chronological order
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(WeekColumn::iter)
    }

    pub fn cell(&self, week: usize, day: usize) -> Option<&DayCell> {
        self.weeks.get(week).and_then(|w| w.days().get(day))
    }

    /// Locate the cell for a date, if the grid covers it
    pub fn find(&self, date: NaiveDate) -> Option<&DayCell> {
        let offset = (date - self.start()).num_days();
        if offset < 0 {
            return None;
        }
        let offset = offset as usize;
        self.cell(offset / DAYS_PER_WEEK, offset % DAYS_PER_WEEK)
    }
}
