//! Civil date to Julian Day conversion.

use miqat_types::CivilDate;

/// First day of the Gregorian calendar.
const GREGORIAN_START: (i32, u32, u32) = (1582, 10, 15);

/// Julian Day of local midnight at the start of `date`.
///
/// Dates before 1582-10-15 are read in the Julian calendar. The date is not
/// validated: out-of-range days carry into the following month.
///
/// # Example
/// ```rust
/// use miqat_astronomy::julian_day;
/// use miqat_types::CivilDate;
///
/// assert_eq!(julian_day(CivilDate::new(2000, 1, 1), 0.0), 2451544.5);
/// ```
pub fn julian_day(date: CivilDate, utc_offset: f64) -> f64 {
    let mut year = f64::from(date.year);
    let mut month = f64::from(date.month);

    // January and February count as months 13 and 14 of the previous year.
    if date.month <= 2 {
        year -= 1.0;
        month += 12.0;
    }

    let gregorian = if (date.year, date.month, date.day) >= GREGORIAN_START {
        let century = (year / 100.0).floor();
        2.0 - century + (century / 4.0).floor()
    } else {
        0.0
    };

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + f64::from(date.day)
        + gregorian
        - 1524.5
        - utc_offset / 24.0
}
