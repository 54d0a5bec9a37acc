//! The daily pipeline: ephemeris window, base solve, seasonal curve,
//! extreme-latitude policy, intervals and normalization.

use log::debug;
use miqat_astronomy::{julian_day, to_topocentric, EphemerisCache};
use miqat_types::{CivilDate, ExtremeMethod, Location, Method, Prayer, PrayerTime, PrayerTimes};

use crate::extreme::{resolve, ExtremeContext, ExtremeFlags};
use crate::normalize::normalize;
use crate::seasonal::{seasonal_fajr, seasonal_ishaa};
use crate::solver::{solve_base, RawTimes};

/// Minutes between Imsaak and Fajr when the method sets no interval.
pub const DEFAULT_IMSAAK_INTERVAL: u32 = 10;

const SEASONAL_ZUHR_MINUTES: f64 = 5.0;
const SEASONAL_MAGHRIB_MINUTES: f64 = 3.0;

/// The day a pipeline run solves for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRequest {
    /// Julian Day of local midnight.
    pub julian_day: f64,
    pub day_of_year: u32,
    pub days_in_year: u32,
}

impl DayRequest {
    pub fn for_date(date: CivilDate, location: &Location) -> Self {
        Self {
            julian_day: julian_day(date, location.utc_offset),
            day_of_year: date.day_of_year(),
            days_in_year: date.days_in_year(),
        }
    }

    /// The following day, keeping the year length of this one.
    pub fn next_day(&self) -> Self {
        Self {
            julian_day: self.julian_day + 1.0,
            day_of_year: self.day_of_year + 1,
            days_in_year: self.days_in_year,
        }
    }
}

/// Decimal-hour events of one day and the events a fallback produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayResult {
    pub times: RawTimes,
    pub extreme: ExtremeFlags,
}

/// Runs the full pipeline for one day, reusing `cache` for the ephemeris window.
pub fn compute_day(
    location: &Location,
    method: &Method,
    cache: &mut EphemerisCache,
    request: &DayRequest,
) -> DayResult {
    let geocentric = cache.ensure_window(request.julian_day);
    let window = to_topocentric(&geocentric, location);
    let mut times = solve_base(location, method, &window);
    let latitude = location.latitude;

    let mut invalid = times.shurooq.is_none() || times.asr.is_none() || times.maghrib.is_none();

    if method.seasonal_adjustment {
        times.fajr = seasonal_fajr(latitude, request.day_of_year, times.fajr, times.shurooq);
        times.ishaa = seasonal_ishaa(latitude, request.day_of_year, times.ishaa, times.maghrib);
        invalid |= times.fajr.is_none() || times.ishaa.is_none();

        if let Some(zuhr) = times.zuhr.as_mut() {
            *zuhr += SEASONAL_ZUHR_MINUTES / 60.0;
        }
        if let Some(maghrib) = times.maghrib.as_mut() {
            *maghrib += SEASONAL_MAGHRIB_MINUTES / 60.0;
        }
    } else {
        invalid |= times.fajr.is_none() || times.ishaa.is_none();
    }

    if latitude.abs() > method.extreme_latitude {
        debug!(
            "latitude {} is beyond {}, Fajr and Ishaa go through the extreme policy",
            latitude, method.extreme_latitude
        );
        times.fajr = None;
        times.ishaa = None;
        invalid = true;
    }

    let mut extreme = ExtremeFlags::default();
    if method.extreme != ExtremeMethod::None && (invalid || method.extreme.always_applies()) {
        let ctx = ExtremeContext {
            location,
            method,
            julian_day: request.julian_day,
            days_in_year: request.days_in_year,
            window: &window,
            cache: &*cache,
        };
        (times, extreme) = resolve(&ctx, times);
    }

    if !method.extreme.consumes_intervals() {
        apply_intervals(method, &mut times);
    }

    DayResult { times, extreme }
}

fn apply_intervals(method: &Method, times: &mut RawTimes) {
    if method.fajr_interval != 0 {
        let minutes = f64::from(method.fajr_interval);
        times.fajr = times.shurooq.map(|sh| sh - minutes / 60.0);
    }
    if method.ishaa_interval != 0 {
        let minutes = f64::from(method.ishaa_interval);
        times.ishaa = times.maghrib.map(|mg| mg + minutes / 60.0);
    }
}

/// The six daily events of `date`.
pub fn prayer_times(
    location: &Location,
    method: &Method,
    cache: &mut EphemerisCache,
    date: CivilDate,
) -> PrayerTimes {
    let request = DayRequest::for_date(date, location);
    let day = compute_day(location, method, cache, &request);

    PrayerTimes::from_array(Prayer::DAILY.map(|prayer| {
        normalize(day.times.get(prayer), prayer, method, location, day.extreme.is_set(prayer))
    }))
}

fn imsaak_interval(method: &Method) -> u32 {
    match method.imsaak_interval {
        0 => DEFAULT_IMSAAK_INTERVAL,
        minutes => minutes,
    }
}

/// `method` with Fajr moved `minutes` earlier through the offset mechanism.
fn with_earlier_fajr(method: &Method, minutes: u32) -> Method {
    let mut shifted = *method;
    let current = if method.offsets_enabled { method.offsets.fajr } else { 0.0 };
    shifted.offsets.fajr = current - f64::from(minutes);
    shifted.offsets_enabled = true;
    shifted
}

/// The method whose Fajr is the Imsaak of `method`.
fn imsaak_method(method: &Method) -> Method {
    if method.fajr_interval != 0 {
        let mut derived = *method;
        derived.fajr_interval += imsaak_interval(method);
        derived
    } else if method.imsaak_interval != 0 {
        with_earlier_fajr(method, method.imsaak_interval)
    } else {
        let mut derived = *method;
        derived.fajr_angle += method.imsaak_angle;
        derived
    }
}

/// Imsaak of `date`.
///
/// Derived from Fajr through the Fajr interval, the Imsaak interval or the
/// Imsaak angle, in that order of preference. When that Fajr needed the
/// extreme policy, Imsaak falls back to a fixed interval before Fajr.
pub fn imsaak(location: &Location, method: &Method, cache: &mut EphemerisCache, date: CivilDate) -> PrayerTime {
    let request = DayRequest::for_date(date, location);
    let derived = imsaak_method(method);
    let day = compute_day(location, &derived, cache, &request);

    if !day.extreme.is_set(Prayer::Fajr) {
        return normalize(day.times.fajr, Prayer::Imsaak, &derived, location, false);
    }

    let interval = imsaak_interval(method);
    debug!("Fajr behind Imsaak is extreme on {}, using {} minutes before Fajr", date, interval);
    let derived = with_earlier_fajr(method, interval);
    let day = compute_day(location, &derived, cache, &request);
    normalize(day.times.fajr, Prayer::Imsaak, &derived, location, day.extreme.is_set(Prayer::Fajr))
}

/// Fajr of the day after `date`.
pub fn next_day_fajr(location: &Location, method: &Method, cache: &mut EphemerisCache, date: CivilDate) -> PrayerTime {
    let request = DayRequest::for_date(date, location).next_day();
    let day = compute_day(location, method, cache, &request);
    normalize(day.times.fajr, Prayer::NextFajr, method, location, day.extreme.is_set(Prayer::Fajr))
}

/// Imsaak of the day after `date`.
pub fn next_day_imsaak(location: &Location, method: &Method, cache: &mut EphemerisCache, date: CivilDate) -> PrayerTime {
    imsaak(location, method, cache, date.succ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use miqat_types::Rounding;

    const JAKARTA: Location = Location::new_unchecked(-6.3781, 106.8342, 7.0);
    const DATE: CivilDate = CivilDate::new(2016, 12, 2);

    fn egypt_survey() -> Method {
        Method::from_angles(20.0, 18.0)
    }

    fn hm(time: PrayerTime) -> (u8, u8, u8) {
        (time.hour, time.minute, time.second)
    }

    #[test]
    fn test_jakarta_daily_times() {
        let mut cache = EphemerisCache::new();
        let times = prayer_times(&JAKARTA, &egypt_survey(), &mut cache, DATE);

        assert_eq!(hm(times.fajr), (4, 4, 0));
        assert_eq!(hm(times.shurooq), (5, 28, 0));
        assert_eq!(hm(times.zuhr), (11, 42, 0));
        assert_eq!(hm(times.asr), (15, 8, 0));
        assert_eq!(hm(times.maghrib), (17, 56, 0));
        assert_eq!(hm(times.ishaa), (19, 12, 0));
        assert!(times.extreme_events().is_empty());

        let seconds: Vec<u32> = times.to_array().iter().filter_map(|t| t.seconds_of_day()).collect();
        assert_eq!(seconds.len(), 6);
        assert!(seconds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_jakarta_imsaak_and_next_day() {
        let mut cache = EphemerisCache::new();
        let method = egypt_survey();

        assert_eq!(hm(imsaak(&JAKARTA, &method, &mut cache, DATE)), (3, 57, 0));
        assert_eq!(hm(next_day_fajr(&JAKARTA, &method, &mut cache, DATE)), (4, 4, 0));
        assert_eq!(hm(next_day_imsaak(&JAKARTA, &method, &mut cache, DATE)), (3, 57, 0));
    }

    #[test]
    fn test_next_day_fajr_matches_following_date() {
        let method = Method { rounding: Rounding::None, ..egypt_survey() };
        let next = next_day_fajr(&JAKARTA, &method, &mut EphemerisCache::new(), CivilDate::new(2016, 12, 31));
        let direct = prayer_times(&JAKARTA, &method, &mut EphemerisCache::new(), CivilDate::new(2017, 1, 1));
        assert_eq!(next.seconds_of_day(), direct.fajr.seconds_of_day());
    }

    #[test]
    fn test_imsaak_interval_moves_fajr_offset() {
        let mut cache = EphemerisCache::new();
        let method = Method { imsaak_interval: 20, rounding: Rounding::None, ..egypt_survey() };
        let fajr = prayer_times(&JAKARTA, &method, &mut cache, DATE).fajr.seconds_of_day().unwrap();
        let imsaak = imsaak(&JAKARTA, &method, &mut cache, DATE).seconds_of_day().unwrap();
        assert!((i64::from(fajr) - i64::from(imsaak) - 1200).abs() <= 1);
    }

    #[test]
    fn test_warm_cache_is_bit_identical() {
        let method = egypt_survey();
        let mut warm = EphemerisCache::new();
        for day in 1..=10 {
            let date = CivilDate::new(2016, 12, day);
            let request = DayRequest::for_date(date, &JAKARTA);
            let warmed = compute_day(&JAKARTA, &method, &mut warm, &request);
            let cold = compute_day(&JAKARTA, &method, &mut EphemerisCache::new(), &request);
            assert_eq!(warmed, cold);
        }
    }

    fn jakarta_day(extreme: ExtremeMethod) -> DayResult {
        let method = Method { extreme, ..Method::from_angles(18.0, 18.0) };
        let request = DayRequest::for_date(DATE, &JAKARTA);
        compute_day(&JAKARTA, &method, &mut EphemerisCache::new(), &request)
    }

    #[test]
    fn test_always_policies_replace_solvable_twilight() {
        let base = jakarta_day(ExtremeMethod::None);
        assert!(base.times.fajr.is_some() && base.times.ishaa.is_some());

        for policy in [ExtremeMethod::SeventhOfNightAlways, ExtremeMethod::NearestLatitudeAlways] {
            let day = jakarta_day(policy);
            assert_ne!(day.times.fajr, base.times.fajr, "{}", policy);
            assert_ne!(day.times.ishaa, base.times.ishaa, "{}", policy);
            assert!(day.extreme.is_set(Prayer::Fajr) && day.extreme.is_set(Prayer::Ishaa), "{}", policy);
            assert_eq!(day.times.zuhr, base.times.zuhr);

            let method = Method { extreme: policy, ..Method::from_angles(18.0, 18.0) };
            let times = prayer_times(&JAKARTA, &method, &mut EphemerisCache::new(), DATE);
            assert!(times.fajr.is_extreme() && times.ishaa.is_extreme(), "{}", policy);
        }
    }

    #[test]
    fn test_invalid_policies_keep_solvable_twilight() {
        let base = jakarta_day(ExtremeMethod::None);

        for policy in [ExtremeMethod::SeventhOfNightInvalid, ExtremeMethod::NearestLatitudeInvalid] {
            let day = jakarta_day(policy);
            assert_eq!(day, base, "{}", policy);
            assert!(!day.extreme.any());

            let method = Method { extreme: policy, ..Method::from_angles(18.0, 18.0) };
            let times = prayer_times(&JAKARTA, &method, &mut EphemerisCache::new(), DATE);
            assert!(times.extreme_events().is_empty(), "{}", policy);
        }
    }

    #[test]
    fn test_southern_latitude_beyond_limit_is_forced() {
        let location = Location::new_unchecked(-56.0, -68.0, -3.0);
        let method = Method { extreme: ExtremeMethod::NearestLatitudeInvalid, ..Method::from_angles(18.0, 18.0) };
        let times = prayer_times(&location, &method, &mut EphemerisCache::new(), CivilDate::new(2020, 7, 15));
        assert!(times.fajr.is_extreme() && times.ishaa.is_extreme());
    }

    #[test]
    fn test_summer_65n_is_resolved() {
        let location = Location::new_unchecked(65.0, 18.0, 1.0);
        let date = CivilDate::new(2016, 6, 21);
        let mut cache = EphemerisCache::new();
        let request = DayRequest::for_date(date, &location);

        let base = compute_day(&location, &Method { extreme: ExtremeMethod::None, ..Method::from_angles(18.0, 18.0) }, &mut cache, &request);
        assert_eq!(base.times.fajr, None);
        assert_eq!(base.times.ishaa, None);

        let times = prayer_times(&location, &Method::from_angles(18.0, 18.0), &mut cache, date);
        assert!(times.fajr.is_valid() && times.fajr.is_extreme());
        assert!(times.ishaa.is_valid() && times.ishaa.is_extreme());
        assert!(!times.zuhr.is_extreme());
    }

    #[test]
    fn test_extreme_imsaak_uses_interval_before_fajr() {
        let location = Location::new_unchecked(65.0, 18.0, 1.0);
        let date = CivilDate::new(2016, 6, 21);
        let mut cache = EphemerisCache::new();
        let method = Method::from_angles(18.0, 18.0);

        let fajr = prayer_times(&location, &method, &mut cache, date).fajr;
        let imsaak = imsaak(&location, &method, &mut cache, date);
        assert!(imsaak.is_extreme());

        let gap = (i64::from(fajr.seconds_of_day().unwrap()) - i64::from(imsaak.seconds_of_day().unwrap()))
            .rem_euclid(86_400);
        assert!((540..=660).contains(&gap), "gap {}", gap);
    }

    #[test]
    fn test_unsolvable_with_no_policy() {
        let location = Location::new_unchecked(65.0, 18.0, 1.0);
        let method = Method { extreme: ExtremeMethod::None, ..Method::from_angles(18.0, 18.0) };
        let times = prayer_times(&location, &method, &mut EphemerisCache::new(), CivilDate::new(2016, 6, 21));
        assert!(!times.fajr.is_valid());
        assert!(!times.fajr.is_extreme());
        assert!(times.shurooq.is_valid());
    }

    #[test]
    fn test_ishaa_interval_follows_maghrib() {
        let method = Method { ishaa_interval: 90, ..Method::from_angles(18.0, 0.0) };
        let request = DayRequest::for_date(DATE, &JAKARTA);
        let day = compute_day(&JAKARTA, &method, &mut EphemerisCache::new(), &request);
        assert_eq!(day.times.ishaa, day.times.maghrib.map(|mg| mg + 1.5));
    }

    #[test]
    fn test_fajr_interval_without_sunrise_is_unsolvable() {
        let svalbard = Location::new_unchecked(78.22, 15.65, 1.0);
        let method = Method { fajr_interval: 90, extreme: ExtremeMethod::None, ..Method::from_angles(0.0, 18.0) };
        let request = DayRequest::for_date(CivilDate::new(2016, 6, 21), &svalbard);
        let day = compute_day(&svalbard, &method, &mut EphemerisCache::new(), &request);
        assert_eq!(day.times.fajr, None);
    }

    #[test]
    fn test_extreme_latitude_forces_policy() {
        // Winter at 56°N solves normally, but lies beyond the 55° limit.
        let location = Location::new_unchecked(56.0, 10.0, 1.0);
        let method = Method { extreme: ExtremeMethod::NearestLatitudeInvalid, ..Method::from_angles(18.0, 18.0) };
        let times = prayer_times(&location, &method, &mut EphemerisCache::new(), CivilDate::new(2020, 1, 15));
        assert!(times.fajr.is_extreme() && times.ishaa.is_extreme());
        assert!(!times.asr.is_extreme());

        let relaxed = Method { extreme_latitude: 60.0, ..method };
        let times = prayer_times(&location, &relaxed, &mut EphemerisCache::new(), CivilDate::new(2020, 1, 15));
        assert!(times.extreme_events().is_empty());
    }

    #[test]
    fn test_seasonal_adjustment_shifts_zuhr_and_maghrib() {
        let plain = Method { rounding: Rounding::None, ..Method::from_angles(18.0, 18.0) };
        let seasonal = Method { seasonal_adjustment: true, ..plain };
        let request = DayRequest::for_date(DATE, &JAKARTA);

        let a = compute_day(&JAKARTA, &plain, &mut EphemerisCache::new(), &request).times;
        let b = compute_day(&JAKARTA, &seasonal, &mut EphemerisCache::new(), &request).times;
        assert!((b.zuhr.unwrap() - a.zuhr.unwrap() - 5.0 / 60.0).abs() < 1e-9);
        assert!((b.maghrib.unwrap() - a.maghrib.unwrap() - 3.0 / 60.0).abs() < 1e-9);
        assert_eq!(a.shurooq, b.shurooq);
    }

    #[test]
    fn test_seasonal_adjustment_fills_unsolvable_twilight() {
        let location = Location::new_unchecked(54.0, -2.0, 0.0);
        let method = Method { seasonal_adjustment: true, extreme: ExtremeMethod::None, ..Method::from_angles(18.0, 18.0) };
        let request = DayRequest::for_date(CivilDate::new(2016, 6, 21), &location);
        let day = compute_day(&location, &method, &mut EphemerisCache::new(), &request);

        let sunrise = day.times.shurooq.unwrap();
        let fajr = day.times.fajr.unwrap();
        assert!(fajr < sunrise && sunrise - fajr < 3.0);
        assert!(day.times.ishaa.is_some());
        assert!(!day.extreme.any());
    }
}
