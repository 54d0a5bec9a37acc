//! Islamic prayer times engine: entry points, calculator and method presets.
//!
//! The free functions compute with a fresh ephemeris cache and do not
//! validate their inputs; [`PrayerCalculator`] validates once at
//! construction and keeps the cache between days.

pub mod calculator;
pub mod extension;
pub mod presets;

pub use miqat_astronomy as astronomy;
pub use miqat_rules as rules;
pub use miqat_types as types;

pub use calculator::{PrayerCalculator, Schedule};
pub use extension::PrayerDateExt;
pub use presets::{MethodTable, StandardMethod};
pub use miqat_types::{
    dms_to_decimal, CivilDate, Dms, ExtremeMethod, Hemisphere, Location, LocationBuilder, Madhab, Method,
    MethodBuilder, MiqatError, Offsets, Prayer, PrayerTime, PrayerTimes, QiblaBearing, Rounding,
};

pub mod prelude {
    pub use crate::types::*;
    pub use crate::{compute_imsaak, compute_next_day_fajr, compute_next_day_imsaak, compute_prayer_times, compute_qibla};
    pub use crate::{MethodTable, PrayerCalculator, PrayerDateExt, StandardMethod};
}

use miqat_astronomy::EphemerisCache;

/// The six daily events of `date`.
pub fn compute_prayer_times(location: &Location, method: &Method, date: CivilDate) -> PrayerTimes {
    rules::prayer_times(location, method, &mut EphemerisCache::new(), date)
}

pub fn compute_imsaak(location: &Location, method: &Method, date: CivilDate) -> PrayerTime {
    rules::imsaak(location, method, &mut EphemerisCache::new(), date)
}

/// Fajr of the day after `date`.
pub fn compute_next_day_fajr(location: &Location, method: &Method, date: CivilDate) -> PrayerTime {
    rules::next_day_fajr(location, method, &mut EphemerisCache::new(), date)
}

/// Imsaak of the day after `date`.
pub fn compute_next_day_imsaak(location: &Location, method: &Method, date: CivilDate) -> PrayerTime {
    rules::next_day_imsaak(location, method, &mut EphemerisCache::new(), date)
}

/// Bearing of the Kaaba from true north, `None` at the Kaaba itself.
pub fn compute_qibla(location: &Location) -> Option<QiblaBearing> {
    astronomy::qibla_bearing(location)
}
