//! Moonsighting Committee seasonal twilight.
//!
//! Fajr and Ishaa follow a yearly curve of minutes before Shurooq and after
//! Maghrib. Four breakpoints grow linearly with latitude and the curve is
//! piecewise linear between them over a "season day" that starts near the
//! winter solstice of the observer's hemisphere.

/// Breakpoint slopes (minutes per 55° of latitude) for Fajr.
const FAJR_SLOPES: [f64; 4] = [28.65, 19.44, 32.74, 48.1];
/// Breakpoint slopes for Ishaa.
const ISHAA_SLOPES: [f64; 4] = [25.6, 2.05, -9.21, 6.14];

/// Day of the seasonal cycle: `doy + 10` in the north, `doy - 172` in the south.
pub fn season_day(day_of_year: u32, latitude: f64) -> u32 {
    let doy = i64::from(day_of_year);
    let day = if latitude >= 0.0 {
        let d = doy + 10;
        if d > 365 { d - 365 } else { d }
    } else {
        let d = doy - 172;
        if d < 0 { d + 365 } else { d }
    };
    day.max(0) as u32
}

/// Minutes from the horizon event to the twilight event on `day`.
fn curve_minutes(slopes: [f64; 4], latitude: f64, day: u32) -> f64 {
    let [a, b, c, d] = slopes.map(|k| 75.0 + k / 55.0 * latitude.abs());
    let day = f64::from(day);

    if day < 91.0 {
        a + (b - a) / 91.0 * day
    } else if day < 137.0 {
        b + (c - b) / 46.0 * (day - 91.0)
    } else if day < 183.0 {
        c + (d - c) / 46.0 * (day - 137.0)
    } else if day < 229.0 {
        d + (c - d) / 46.0 * (day - 183.0)
    } else if day < 275.0 {
        c + (b - c) / 46.0 * (day - 229.0)
    } else {
        b + (a - b) / 91.0 * (day - 275.0)
    }
}

/// Fajr after the seasonal adjustment.
///
/// The curve wins when it is later than the computed Fajr or when Fajr has
/// no solution. Without a sunrise the computed value is kept.
pub fn seasonal_fajr(latitude: f64, day_of_year: u32, fajr: Option<f64>, shurooq: Option<f64>) -> Option<f64> {
    let Some(shurooq) = shurooq else { return fajr };
    let minutes = curve_minutes(FAJR_SLOPES, latitude, season_day(day_of_year, latitude));
    let adjusted = shurooq - minutes.floor() / 60.0;
    match fajr {
        Some(f) if f >= adjusted => Some(f),
        _ => Some(adjusted),
    }
}

/// Ishaa after the seasonal adjustment.
///
/// The curve wins when it is earlier than the computed Ishaa or when Ishaa has
/// no solution. Without a sunset the computed value is kept.
pub fn seasonal_ishaa(latitude: f64, day_of_year: u32, ishaa: Option<f64>, maghrib: Option<f64>) -> Option<f64> {
    let Some(maghrib) = maghrib else { return ishaa };
    let minutes = curve_minutes(ISHAA_SLOPES, latitude, season_day(day_of_year, latitude));
    let adjusted = maghrib + minutes.ceil() / 60.0;
    match ishaa {
        Some(i) if i <= adjusted => Some(i),
        _ => Some(adjusted),
    }
}
