//! Proleptic civil dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_DAYS: [[u32; 12]; 2] = [
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
    [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
];

/// A civil date with no time of day.
///
/// Years follow the astronomical convention (year 0 is 1 BCE). The fields are
/// not validated; callers that need a calendar-correct date convert from
/// [`NaiveDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivilDate {
    pub year: i32,
    /// 1-based.
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn is_leap_year(&self) -> bool {
        let y = self.year;
        y % 4 == 0 && (y % 100 != 0 || y % 400 == 0)
    }

    /// Ordinal day within the year, 1 for January 1st.
    pub fn day_of_year(&self) -> u32 {
        let table = &MONTH_DAYS[usize::from(self.is_leap_year())];
        let full_months = self.month.saturating_sub(1).min(12) as usize;
        table[..full_months].iter().sum::<u32>() + self.day
    }

    /// 365 or 366.
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() { 366 } else { 365 }
    }

    /// The following day by incrementing the day field only.
    ///
    /// Day numbers past the end of the month are fine for the Julian Day
    /// arithmetic, which carries them into the next month.
    pub fn succ(&self) -> Self {
        Self { day: self.day + 1, ..*self }
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
