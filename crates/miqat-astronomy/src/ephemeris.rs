//! Apparent solar coordinates for one instant.
//!
//! Steps:
//! 1. Heliocentric longitude, latitude and radius of the Earth from VSOP87D.
//! 2. Geocentric solar longitude (+180°) and latitude (sign flipped).
//! 3. Nutation in longitude and obliquity, mean obliquity of the ecliptic.
//! 4. Aberration (-20.4898" / R).
//! 5. Ecliptic to equatorial conversion and apparent sidereal time at Greenwich.

use vsop87::vsop87d;

use crate::angle::normalize_360;
use crate::tables::{NUTATION_AMPLITUDES, NUTATION_ARGUMENTS};

/// Julian Day of the J2000.0 epoch.
pub const J2000: f64 = 2451545.0;

/// Solar position for one day, in degrees unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEphemeris {
    /// Apparent right ascension.
    pub right_ascension: f64,
    /// Apparent declination.
    pub declination: f64,
    /// Apparent sidereal time at Greenwich.
    pub sidereal_time: f64,
    /// Earth-Sun distance, AU.
    pub distance: f64,
    /// Parallax shift of the right ascension in radians. Zero for geocentric values.
    pub ra_shift: f64,
}

/// Nutation in longitude and obliquity, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude: f64,
    pub obliquity: f64,
}

/// Geocentric ecliptic longitude and latitude of the Sun in degrees, and the
/// Earth-Sun distance in AU.
pub fn geocentric_sun(julian_day: f64) -> (f64, f64, f64) {
    let earth = vsop87d::earth(julian_day);
    let longitude = normalize_360(earth.longitude().to_degrees() + 180.0);
    let latitude = -earth.latitude().to_degrees();
    (longitude, latitude, earth.distance())
}

/// Nutation from the 63-term IAU 1980 series.
///
/// `jc` is in Julian centuries from J2000.0.
pub fn nutation(jc: f64) -> Nutation {
    let jc2 = jc * jc;
    let jc3 = jc2 * jc;
    let arguments = [
        297.85036 + 445267.111480 * jc - 0.0019142 * jc2 + jc3 / 189474.0,
        357.52772 + 35999.050340 * jc - 0.0001603 * jc2 - jc3 / 300000.0,
        134.96298 + 477198.867398 * jc + 0.0086972 * jc2 + jc3 / 56250.0,
        93.27191 + 483202.017538 * jc - 0.0036825 * jc2 + jc3 / 327270.0,
        125.04452 - 1934.136261 * jc + 0.0020708 * jc2 + jc3 / 450000.0,
    ];

    let (psi, eps) = NUTATION_ARGUMENTS
        .iter()
        .zip(NUTATION_AMPLITUDES.iter())
        .fold((0.0, 0.0), |(psi, eps), (multipliers, amp)| {
            let angle: f64 = multipliers
                .iter()
                .zip(arguments.iter())
                .map(|(k, x)| k * x)
                .sum::<f64>()
                .to_radians();
            (
                psi + (amp[0] + jc * amp[1]) * angle.sin(),
                eps + (amp[2] + jc * amp[3]) * angle.cos(),
            )
        });

    // Amplitudes are in 0.0001 arcseconds.
    Nutation { longitude: psi / 36_000_000.0, obliquity: eps / 36_000_000.0 }
}

/// Mean obliquity of the ecliptic in degrees (Laskar's polynomial, Meeus Eq. 22.3).
pub fn mean_obliquity(jc: f64) -> f64 {
    const COEFFS: [f64; 11] = [
        84381.448, -4680.93, -1.55, 1999.25, -51.38, -249.67, -39.05, 7.12, 27.87, 5.79, 2.45,
    ];
    let u = jc / 100.0;
    let arcseconds = COEFFS.iter().rev().fold(0.0, |acc, c| acc * u + c);
    arcseconds / 3600.0
}

/// Apparent solar coordinates at `julian_day` (UT).
pub fn compute_ephemeris(julian_day: f64) -> DayEphemeris {
    let jc = (julian_day - J2000) / 36525.0;

    let (longitude, latitude, distance) = geocentric_sun(julian_day);

    let nut = nutation(jc);
    let obliquity = (mean_obliquity(jc) + nut.obliquity).to_radians();
    let apparent_longitude = (longitude + nut.longitude - 20.4898 / (3600.0 * distance)).to_radians();
    let beta = latitude.to_radians();

    let mean_sidereal = 280.46061837 + 360.98564736629 * (julian_day - J2000) + 0.000387933 * jc * jc
        - jc * jc * jc / 38_710_000.0;
    let sidereal_time = normalize_360(mean_sidereal) + nut.longitude * obliquity.cos();

    let right_ascension = normalize_360(
        (apparent_longitude.sin() * obliquity.cos() - beta.tan() * obliquity.sin())
            .atan2(apparent_longitude.cos())
            .to_degrees(),
    );
    let declination = (beta.sin() * obliquity.cos()
        + beta.cos() * obliquity.sin() * apparent_longitude.sin())
    .asin()
    .to_degrees();

    DayEphemeris { right_ascension, declination, sidereal_time, distance, ra_shift: 0.0 }
}
