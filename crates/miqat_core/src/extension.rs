//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;
use miqat_types::{CivilDate, Location, Method, PrayerTime, PrayerTimes};

/// Extends `NaiveDate` with prayer-time helpers.
pub trait PrayerDateExt {
    fn to_civil_date(&self) -> CivilDate;

    /// The six daily events at `location`, computed with a fresh cache.
    fn prayer_times(&self, location: &Location, method: &Method) -> PrayerTimes;

    fn imsaak(&self, location: &Location, method: &Method) -> PrayerTime;
}

impl PrayerDateExt for NaiveDate {
    fn to_civil_date(&self) -> CivilDate {
        CivilDate::from(*self)
    }

    fn prayer_times(&self, location: &Location, method: &Method) -> PrayerTimes {
        crate::compute_prayer_times(location, method, self.to_civil_date())
    }

    fn imsaak(&self, location: &Location, method: &Method) -> PrayerTime {
        crate::compute_imsaak(location, method, self.to_civil_date())
    }
}
