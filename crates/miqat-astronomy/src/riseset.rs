//! Transit, rise and set from a topocentric window (Meeus chapter 15).
//!
//! Times are decimal hours of the local day the window is centered on.

use miqat_types::Location;

use crate::angle::{fraction, normalize_180, normalize_360, signed_180};
use crate::window::EphemerisWindow;

/// Altitude of the Sun's center at apparent rise/set, degrees.
pub const SUN_HORIZON_ALTITUDE: f64 = -0.833370;
/// Horizon dip per square root meter of elevation, degrees.
const ELEVATION_DIP: f64 = 0.0347;
/// Sidereal degrees per solar day.
const SIDEREAL_RATE: f64 = 360.985647;

/// Which horizon crossing to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizonEvent {
    Rise,
    Set,
}

/// Three-point interpolation at fraction `n` of a day from the middle value.
fn interpolate(y: [f64; 3], n: f64) -> f64 {
    let a = y[1] - y[0];
    let b = y[2] - y[1];
    let c = b - a;
    y[1] + n / 2.0 * (a + b + n * c)
}

/// Right ascensions of the window, unwrapped across the 0°/360° seam.
fn unwrapped_right_ascension(window: &EphemerisWindow) -> [f64; 3] {
    let [mut ra0, ra1, mut ra2] = window.days.map(|d| d.right_ascension);
    if ra1 > 350.0 && ra2 < 10.0 {
        ra2 += 360.0;
    }
    if ra0 > 350.0 && ra1 < 10.0 {
        ra0 -= 360.0;
    }
    [ra0, ra1, ra2]
}

/// Refraction term added to the refined altitude (degrees) before the final
/// rise/set correction.
///
/// Saemundsson's form scaled for pressure and temperature, with the tangent
/// read in degrees. The horizon altitude already accounts for standard
/// refraction, so this stays a small weather-dependent residual.
pub fn refraction(location: &Location, altitude: f64) -> f64 {
    let density = (location.pressure / 1010.0) * (283.0 / (273.0 + location.temperature));
    let tangent = (altitude + 10.3 / (altitude + 5.11)).to_radians().tan().to_degrees();
    density * (1.02 / (tangent + 0.0019279)) / 60.0
}

/// Local time of solar transit (Zuhr before offsets), decimal hours.
pub fn transit(longitude: f64, window: &EphemerisWindow) -> f64 {
    let today = window.curr();
    let m = fraction((today.right_ascension - longitude - today.sidereal_time) / 360.0);
    let sidereal = today.sidereal_time + SIDEREAL_RATE * m;
    let ra = interpolate(unwrapped_right_ascension(window), m);
    let hour_angle = signed_180(sidereal + longitude - ra);
    24.0 * (m - hour_angle / 360.0)
}

/// Local time of sunrise or sunset, decimal hours, with one refinement pass.
///
/// Returns `None` when the Sun stays above or below the horizon all day.
pub fn rise_set(location: &Location, window: &EphemerisWindow, event: HorizonEvent) -> Option<f64> {
    let latitude = location.latitude.to_radians();
    let today = window.curr();
    let declination = today.declination.to_radians();

    let cos_h = (SUN_HORIZON_ALTITUDE.to_radians().sin() - latitude.sin() * declination.sin())
        / (latitude.cos() * declination.cos());
    if !(cos_h > -1.0 && cos_h < 1.0) {
        return None;
    }
    let hour_angle = normalize_180(cos_h.acos().to_degrees());

    let transit_fraction = (today.right_ascension - location.longitude - today.sidereal_time) / 360.0;
    let m = fraction(match event {
        HorizonEvent::Rise => transit_fraction - hour_angle / 360.0,
        HorizonEvent::Set => transit_fraction + hour_angle / 360.0,
    });

    let sidereal = normalize_360(today.sidereal_time + SIDEREAL_RATE * m);
    let ra = interpolate(unwrapped_right_ascension(window), m);
    let dec = interpolate(window.days.map(|d| d.declination), m).to_radians();

    let local_hour_angle = signed_180(sidereal + location.longitude - ra) - today.ra_shift.to_degrees();
    let lha = local_hour_angle.to_radians();

    let mut altitude = (latitude.sin() * dec.sin() + latitude.cos() * dec.cos() * lha.cos())
        .asin()
        .to_degrees();
    altitude += refraction(location, altitude);

    let correction = (altitude - SUN_HORIZON_ALTITUDE + ELEVATION_DIP * location.elevation.max(0.0).sqrt())
        / (360.0 * dec.cos() * latitude.cos() * lha.sin());

    Some((m + correction) * 24.0)
}
