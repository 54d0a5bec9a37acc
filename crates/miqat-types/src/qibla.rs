//! Qibla bearing and degree/minute/second angles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude of the Kaaba, degrees north.
pub const KAABA_LATITUDE: f64 = 21.423333;
/// Longitude of the Kaaba, degrees east.
pub const KAABA_LONGITUDE: f64 = 39.823333;

/// An angle split into whole degrees, whole minutes and seconds.
///
/// All three components carry the sign of the angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: i32,
    pub minutes: i32,
    pub seconds: f64,
}

impl Dms {
    /// Splits a decimal angle, truncating toward zero at each step.
    pub fn from_decimal(decimal: f64) -> Self {
        let degrees = decimal.trunc();
        let rest = (decimal - degrees) * 60.0;
        let minutes = rest.trunc();
        let seconds = (rest - minutes) * 60.0;
        Self { degrees: degrees as i32, minutes: minutes as i32, seconds }
    }

    pub fn to_decimal(&self) -> f64 {
        f64::from(self.degrees) + f64::from(self.minutes) / 60.0 + self.seconds / 3600.0
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}'{:.2}\"", self.degrees, self.minutes.abs(), self.seconds.abs())
    }
}

/// Compass side of a coordinate written in unsigned form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

/// Converts an unsigned degree/minute/second coordinate to signed decimal degrees.
/// South and West are negative.
pub fn dms_to_decimal(degrees: u32, minutes: u32, seconds: f64, hemisphere: Hemisphere) -> f64 {
    let sum = f64::from(degrees) + f64::from(minutes) / 60.0 + seconds / 3600.0;
    match hemisphere {
        Hemisphere::South | Hemisphere::West => -sum,
        Hemisphere::North | Hemisphere::East => sum,
    }
}

/// Direction of the Kaaba from an observer, clockwise from true north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QiblaBearing(f64);

impl QiblaBearing {
    /// Stores a signed bearing, wrapping it into (-180, 180] when it lies outside.
    pub fn from_signed(degrees: f64) -> Self {
        if degrees > -180.0 && degrees <= 180.0 {
            return Self(degrees);
        }
        let wrapped = degrees.rem_euclid(360.0);
        Self(if wrapped > 180.0 { wrapped - 360.0 } else { wrapped })
    }

    /// Signed bearing: positive east of north, negative west of north.
    pub fn signed(&self) -> f64 {
        self.0
    }

    /// Compass bearing in [0, 360).
    pub fn degrees(&self) -> f64 {
        self.0.rem_euclid(360.0)
    }

    pub fn to_dms(&self) -> Dms {
        Dms::from_decimal(self.0)
    }
}

impl fmt::Display for QiblaBearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal() {
        let dms = Dms::from_decimal(21.5);
        assert_eq!(dms.degrees, 21);
        assert_eq!(dms.minutes, 30);
        assert!(dms.seconds.abs() < 1e-9);
    }

    #[test]
    fn test_negative_components_share_sign() {
        let dms = Dms::from_decimal(-64.79325);
        assert_eq!(dms.degrees, -64);
        assert_eq!(dms.minutes, -47);
        assert!(dms.seconds < 0.0);
        assert!((dms.to_decimal() + 64.79325).abs() < 1e-9);
    }

    #[test]
    fn test_dms_to_decimal_hemisphere() {
        assert!((dms_to_decimal(6, 22, 41.16, Hemisphere::South) + 6.3781).abs() < 1e-6);
        assert!((dms_to_decimal(106, 50, 3.12, Hemisphere::East) - 106.8342).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_normalization() {
        let q = QiblaBearing::from_signed(-64.79325);
        assert!((q.degrees() - 295.20675).abs() < 1e-9);
        assert_eq!(q.signed(), -64.79325);
        assert_eq!(QiblaBearing::from_signed(-64.79).to_string(), "295.2100°");
    }

    #[test]
    fn test_from_signed_wraps_out_of_range() {
        assert_eq!(QiblaBearing::from_signed(270.0).signed(), -90.0);
        assert_eq!(QiblaBearing::from_signed(-180.0).signed(), 180.0);
        assert_eq!(QiblaBearing::from_signed(180.0).signed(), 180.0);
        assert_eq!(QiblaBearing::from_signed(-450.0).signed(), -90.0);
        assert_eq!(QiblaBearing::from_signed(-450.0).degrees(), 270.0);
    }
}
