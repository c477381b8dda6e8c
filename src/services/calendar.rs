//! Grid start-date resolution

use chrono::{Datelike, Days, NaiveDate};

use crate::types::{CommitmapError, Result};

/// First grid day for `year`: Jan 1 if it is a Monday, otherwise the
/// following Monday.
pub fn start_date(year: i32) -> Result<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CommitmapError::InvalidYear(year))?;
    let weekday = jan1.weekday().number_from_monday();
    let shift = (8 - weekday) % 7;

    jan1.checked_add_days(Days::new(u64::from(shift)))
        .ok_or(CommitmapError::InvalidYear(year))
}
