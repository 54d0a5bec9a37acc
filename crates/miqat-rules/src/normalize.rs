//! Decimal hours to clock time.

use miqat_types::{Location, Method, Prayer, PrayerTime, Rounding};

const SECONDS_PER_DAY: i64 = 86_400;
/// Seconds at which `Normal` and `Special` rounding move to the next minute.
const ROUND_UP_SECONDS: i64 = 30;
/// Seconds at which `Aggressive` rounding moves to the next minute.
const AGGRESSIVE_ROUND_UP_SECONDS: i64 = 1;
/// Absorbs representation error so whole-second inputs stay whole seconds.
const SECOND_EPSILON: f64 = 1e-6;

/// Seconds threshold for rounding up, or `None` to truncate to the minute.
fn round_up_threshold(rounding: Rounding, prayer: Prayer) -> Option<i64> {
    let truncates = matches!(prayer, Prayer::Shurooq | Prayer::Imsaak);
    match rounding {
        Rounding::None => None,
        Rounding::Normal => Some(ROUND_UP_SECONDS),
        Rounding::Special if truncates => None,
        Rounding::Special => Some(ROUND_UP_SECONDS),
        Rounding::Aggressive if truncates => None,
        Rounding::Aggressive => Some(AGGRESSIVE_ROUND_UP_SECONDS),
    }
}

/// Converts a decimal hour into a clock time.
///
/// Applies, in order: the method's minute offset for `prayer`, forward
/// wrapping of negative values, rounding, the DST shift and the final wrap
/// into one day. `None` or a non-finite value becomes the unsolvable marker.
pub fn normalize(
    hours: Option<f64>,
    prayer: Prayer,
    method: &Method,
    location: &Location,
    extreme: bool,
) -> PrayerTime {
    let Some(mut hours) = hours.filter(|h| h.is_finite()) else {
        return PrayerTime::unsolvable(extreme);
    };

    hours += method.offset_hours(prayer);
    if hours < 0.0 {
        hours = hours.rem_euclid(24.0);
    }

    let mut seconds = (hours * 3600.0 + SECOND_EPSILON).floor() as i64;

    if method.rounding != Rounding::None {
        let leftover = seconds % 60;
        seconds -= leftover;
        if round_up_threshold(method.rounding, prayer).is_some_and(|t| leftover >= t) {
            seconds += 60;
        }
    }

    seconds += (location.dst * 3600.0).round() as i64;
    let seconds = seconds.rem_euclid(SECONDS_PER_DAY);

    PrayerTime::new(
        (seconds / 3600) as u8,
        (seconds / 60 % 60) as u8,
        (seconds % 60) as u8,
        extreme,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> f64 {
        f64::from(h) + f64::from(m) / 60.0 + f64::from(s) / 3600.0
    }

    fn method(rounding: Rounding) -> Method {
        Method { rounding, ..Method::default() }
    }

    const LOC: Location = Location::new_unchecked(0.0, 0.0, 0.0);

    #[test]
    fn test_unsolvable() {
        let t = normalize(None, Prayer::Fajr, &Method::default(), &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (99, 99, 0));
        assert!(!normalize(Some(f64::NAN), Prayer::Fajr, &Method::default(), &LOC, true).is_valid());
    }

    #[test]
    fn test_no_rounding_keeps_seconds() {
        let t = normalize(Some(hms(4, 3, 47)), Prayer::Fajr, &method(Rounding::None), &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (4, 3, 47));
    }

    #[test]
    fn test_normal_rounds_every_event() {
        let m = method(Rounding::Normal);
        let t = normalize(Some(hms(5, 28, 30)), Prayer::Shurooq, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (5, 29, 0));
        let t = normalize(Some(hms(5, 28, 29)), Prayer::Fajr, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (5, 28, 0));
    }

    #[test]
    fn test_special_truncates_shurooq_and_imsaak() {
        let m = method(Rounding::Special);
        let t = normalize(Some(hms(5, 28, 59)), Prayer::Shurooq, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (5, 28, 0));
        let t = normalize(Some(hms(3, 53, 59)), Prayer::Imsaak, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (3, 53, 0));
        let t = normalize(Some(hms(4, 3, 47)), Prayer::Fajr, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (4, 4, 0));
        let t = normalize(Some(hms(4, 3, 47)), Prayer::NextFajr, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (4, 4, 0));
    }

    #[test]
    fn test_aggressive_rounds_up_at_one_second() {
        let m = method(Rounding::Aggressive);
        let t = normalize(Some(hms(11, 42, 1)), Prayer::Zuhr, &m, &LOC, false);
        assert_eq!((t.hour, t.minute), (11, 43));
        let t = normalize(Some(hms(11, 42, 0)), Prayer::Zuhr, &m, &LOC, false);
        assert_eq!((t.hour, t.minute), (11, 42));
        let t = normalize(Some(hms(5, 28, 59)), Prayer::Shurooq, &m, &LOC, false);
        assert_eq!((t.hour, t.minute), (5, 28));
    }

    #[test]
    fn test_rounding_carries_into_next_hour_and_day() {
        let m = method(Rounding::Special);
        let t = normalize(Some(hms(23, 59, 45)), Prayer::Ishaa, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
    }

    #[test]
    fn test_offsets_and_negative_wrap() {
        let mut m = Method { offsets_enabled: true, rounding: Rounding::None, ..Method::default() };
        m.offsets.fajr = -20.0;
        let t = normalize(Some(hms(0, 10, 0)), Prayer::Fajr, &m, &LOC, false);
        assert_eq!((t.hour, t.minute, t.second), (23, 50, 0));
        // Imsaak reads the Fajr slot.
        let t = normalize(Some(hms(0, 10, 0)), Prayer::Imsaak, &m, &LOC, false);
        assert_eq!((t.hour, t.minute), (23, 50));
    }

    #[test]
    fn test_offsets_ignored_when_disabled() {
        let mut m = method(Rounding::None);
        m.offsets.zuhr = 5.0;
        let t = normalize(Some(hms(12, 0, 0)), Prayer::Zuhr, &m, &LOC, false);
        assert_eq!((t.hour, t.minute), (12, 0));
    }

    #[test]
    fn test_dst_and_wrap() {
        let loc = LOC.with_dst(1.0);
        let t = normalize(Some(hms(23, 30, 0)), Prayer::Ishaa, &Method::default(), &loc, true);
        assert_eq!((t.hour, t.minute, t.second), (0, 30, 0));
        assert!(t.extreme);
        let t = normalize(Some(25.5), Prayer::Ishaa, &Method::default(), &LOC, false);
        assert_eq!((t.hour, t.minute), (1, 30));
    }

    #[test]
    fn test_idempotent_on_whole_seconds() {
        for rounding in [Rounding::None, Rounding::Normal, Rounding::Special, Rounding::Aggressive] {
            let m = method(rounding);
            for prayer in Prayer::DAILY {
                let first = normalize(Some(17.9378), prayer, &m, &LOC, false);
                let again = normalize(
                    Some(hms(first.hour.into(), first.minute.into(), first.second.into())),
                    prayer,
                    &m,
                    &LOC,
                    false,
                );
                assert_eq!(first, again, "{:?} {:?}", rounding, prayer);
            }
        }
    }
}
