//! Diurnal parallax (Meeus chapter 40).

use miqat_types::Location;

use crate::angle::normalize_360;
use crate::ephemeris::DayEphemeris;
use crate::window::EphemerisWindow;

/// Polar to equatorial radius ratio, b/a.
const EARTH_AXIS_RATIO: f64 = 0.99664719;
/// Equatorial radius in meters.
const EARTH_RADIUS: f64 = 6378140.0;
/// Equatorial horizontal parallax of the Sun at 1 AU, arcseconds.
const SOLAR_PARALLAX: f64 = 8.794;

fn correct_day(day: &DayEphemeris, location: &Location) -> DayEphemeris {
    let latitude = location.latitude.to_radians();
    let hour_angle = normalize_360(day.sidereal_time + location.longitude - day.right_ascension).to_radians();
    let parallax = (SOLAR_PARALLAX / (3600.0 * day.distance)).to_radians();

    let u = (EARTH_AXIS_RATIO * latitude.tan()).atan();
    let rho_cos = u.cos() + location.elevation / EARTH_RADIUS * latitude.cos();
    let rho_sin = EARTH_AXIS_RATIO * u.sin() + location.elevation / EARTH_RADIUS * latitude.sin();

    let declination = day.declination.to_radians();
    let denominator = declination.cos() - rho_cos * parallax.sin() * hour_angle.cos();
    let ra_shift = (-rho_cos * parallax.sin() * hour_angle.sin()).atan2(denominator);
    let topocentric_declination = ((declination.sin() - rho_sin * parallax.sin()) * ra_shift.cos())
        .atan2(denominator)
        .to_degrees();

    DayEphemeris {
        right_ascension: day.right_ascension + ra_shift.to_degrees(),
        declination: topocentric_declination,
        sidereal_time: day.sidereal_time,
        distance: day.distance,
        ra_shift,
    }
}

/// Corrects each day of a geocentric window for the observer's position.
///
/// The sidereal time and distance are carried over; `ra_shift` records the
/// right ascension parallax used later by the rise/set refinement.
pub fn to_topocentric(window: &EphemerisWindow, location: &Location) -> EphemerisWindow {
    EphemerisWindow {
        julian_day: window.julian_day,
        days: window.days.map(|day| correct_day(&day, location)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax_is_a_few_arcseconds() {
        let geo = EphemerisWindow::compute(2457724.2083333335);
        let location = Location::new_unchecked(-6.3781, 106.8342, 7.0).with_elevation(500.0);
        let topo = to_topocentric(&geo, &location);

        for (g, t) in geo.days.iter().zip(topo.days.iter()) {
            // Solar parallax never exceeds 8.8 arcseconds.
            assert!((g.declination - t.declination).abs() < 9.0 / 3600.0);
            assert!((g.right_ascension - t.right_ascension).abs() < 9.0 / 3600.0);
            assert_eq!(g.sidereal_time, t.sidereal_time);
            assert_eq!(g.distance, t.distance);
            assert!(t.ra_shift.abs() < (9.0f64 / 3600.0).to_radians());
        }
    }

    #[test]
    fn test_is_pure() {
        let geo = EphemerisWindow::compute(2451544.5);
        let location = Location::new_unchecked(48.85, 2.35, 1.0);
        assert_eq!(to_topocentric(&geo, &location), to_topocentric(&geo, &location));
    }
}
