//! Stateful calculator that keeps the ephemeris window between calls.

use chrono::NaiveDate;
use log::debug;
use miqat_astronomy::{qibla_bearing, EphemerisCache};
use miqat_types::{CivilDate, Location, Method, MiqatError, PrayerTime, PrayerTimes, QiblaBearing};

use crate::presets::StandardMethod;

/// Prayer times for one location and convention.
///
/// Owns its ephemeris cache, so computing consecutive days is cheaper than
/// calling the free functions in a loop. Results are identical either way.
/// The calculator is `Send`; share one across threads behind a lock.
#[derive(Debug, Clone)]
pub struct PrayerCalculator {
    location: Location,
    method: Method,
    cache: EphemerisCache,
}

impl PrayerCalculator {
    /// # Errors
    /// Returns `InvalidLocation` or `InvalidMethod` when either fails validation.
    pub fn new(location: Location, method: Method) -> Result<Self, MiqatError> {
        location.validate()?;
        method.validate()?;
        Ok(Self { location, method, cache: EphemerisCache::new() })
    }

    /// # Errors
    /// Returns `InvalidLocation` when the location fails validation.
    pub fn with_standard(location: Location, standard: StandardMethod) -> Result<Self, MiqatError> {
        Self::new(location, standard.method())
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Moves the calculator. The cached ephemeris does not depend on the observer.
    pub fn set_location(&mut self, location: Location) -> Result<(), MiqatError> {
        location.validate()?;
        self.location = location;
        Ok(())
    }

    pub fn set_method(&mut self, method: Method) -> Result<(), MiqatError> {
        method.validate()?;
        self.method = method;
        Ok(())
    }

    pub fn prayer_times(&mut self, date: impl Into<CivilDate>) -> PrayerTimes {
        miqat_rules::prayer_times(&self.location, &self.method, &mut self.cache, date.into())
    }

    pub fn imsaak(&mut self, date: impl Into<CivilDate>) -> PrayerTime {
        miqat_rules::imsaak(&self.location, &self.method, &mut self.cache, date.into())
    }

    pub fn next_day_fajr(&mut self, date: impl Into<CivilDate>) -> PrayerTime {
        miqat_rules::next_day_fajr(&self.location, &self.method, &mut self.cache, date.into())
    }

    pub fn next_day_imsaak(&mut self, date: impl Into<CivilDate>) -> PrayerTime {
        miqat_rules::next_day_imsaak(&self.location, &self.method, &mut self.cache, date.into())
    }

    /// Bearing of the Kaaba, `None` when standing on it.
    pub fn qibla(&self) -> Option<QiblaBearing> {
        qibla_bearing(&self.location)
    }

    /// Ephemeris evaluations performed so far.
    pub fn ephemeris_evaluations(&self) -> u64 {
        self.cache.evaluations()
    }

    /// Lazily yields the prayer times of every date from `start` to `end` inclusive.
    pub fn schedule(&mut self, start: NaiveDate, end: NaiveDate) -> Schedule<'_> {
        debug!("schedule from {} to {} at {:?}", start, end, self.location);
        Schedule { calculator: self, current: Some(start), end }
    }
}

/// Iterator over consecutive days, see [`PrayerCalculator::schedule`].
pub struct Schedule<'a> {
    calculator: &'a mut PrayerCalculator,
    current: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Schedule<'_> {
    type Item = (NaiveDate, PrayerTimes);

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.current.filter(|d| *d <= self.end)?;
        self.current = date.succ_opt();
        Some((date, self.calculator.prayer_times(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_prayer_times;

    fn jakarta() -> Location {
        Location::new(-6.3781, 106.8342, 7.0).unwrap()
    }

    #[test]
    fn test_new_validates() {
        let bad = Location::new_unchecked(91.0, 0.0, 0.0);
        assert!(matches!(
            PrayerCalculator::new(bad, Method::default()),
            Err(MiqatError::InvalidLocation { .. })
        ));
        assert!(matches!(
            PrayerCalculator::new(jakarta(), Method::from_angles(-1.0, 18.0)),
            Err(MiqatError::InvalidMethod { .. })
        ));
    }

    #[test]
    fn test_setters_validate_and_keep_state() -> anyhow::Result<()> {
        let mut calc = PrayerCalculator::with_standard(jakarta(), StandardMethod::EgyptSurvey)?;
        assert!(calc.set_location(Location::new_unchecked(0.0, 200.0, 0.0)).is_err());
        assert_eq!(calc.location(), &jakarta());

        calc.set_method(StandardMethod::MuslimWorldLeague.method())?;
        assert_eq!(calc.method().ishaa_angle, 17.0);
        Ok(())
    }

    #[test]
    fn test_matches_free_function() -> anyhow::Result<()> {
        let method = StandardMethod::EgyptSurvey.method();
        let mut calc = PrayerCalculator::new(jakarta(), method)?;
        let date = CivilDate::new(2016, 12, 2);
        assert_eq!(calc.prayer_times(date), compute_prayer_times(&jakarta(), &method, date));
        assert_eq!(calc.prayer_times(date).fajr.to_string(), "04:04:00");
        Ok(())
    }

    #[test]
    fn test_schedule_reuses_window() -> anyhow::Result<()> {
        let mut calc = PrayerCalculator::with_standard(jakarta(), StandardMethod::EgyptSurvey)?;
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

        let days: Vec<_> = calc.schedule(start, end).collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days[2].0, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        // Three evaluations for the first window, one per following day.
        assert_eq!(calc.ephemeris_evaluations(), 7);

        for (date, times) in days {
            assert_eq!(times, compute_prayer_times(&jakarta(), calc.method(), date.into()));
        }
        Ok(())
    }

    #[test]
    fn test_empty_schedule() -> anyhow::Result<()> {
        let mut calc = PrayerCalculator::with_standard(jakarta(), StandardMethod::EgyptSurvey)?;
        let start = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(calc.schedule(start, end).count(), 0);
        Ok(())
    }

    #[test]
    fn test_calculator_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<PrayerCalculator>();
    }
}
