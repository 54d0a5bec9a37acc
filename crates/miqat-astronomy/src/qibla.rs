//! Great-circle bearing toward the Kaaba.

use miqat_types::{Location, QiblaBearing, KAABA_LATITUDE, KAABA_LONGITUDE};

/// Within this distance of the Kaaba in both coordinates, degrees, the bearing is undefined.
const KAABA_TOLERANCE: f64 = 1e-3;

/// Initial great-circle bearing from the observer to the Kaaba.
///
/// Returns `None` at the Kaaba itself, where every direction is the Qibla.
///
/// # Example
/// ```rust
/// use miqat_astronomy::qibla_bearing;
/// use miqat_types::Location;
///
/// let jakarta = Location::new_unchecked(-6.378, 106.834, 7.0);
/// let bearing = qibla_bearing(&jakarta).unwrap();
/// assert!((bearing.degrees() - 295.2068).abs() < 0.01);
/// ```
pub fn qibla_bearing(location: &Location) -> Option<QiblaBearing> {
    if (location.latitude - KAABA_LATITUDE).abs() < KAABA_TOLERANCE
        && (location.longitude - KAABA_LONGITUDE).abs() < KAABA_TOLERANCE
    {
        return None;
    }

    let latitude = location.latitude.to_radians();
    let delta_longitude = (KAABA_LONGITUDE - location.longitude).to_radians();
    let bearing = delta_longitude.sin().atan2(
        latitude.cos() * KAABA_LATITUDE.to_radians().tan() - latitude.sin() * delta_longitude.cos(),
    );

    Some(QiblaBearing::from_signed(bearing.to_degrees()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jakarta() {
        let q = qibla_bearing(&Location::new_unchecked(-6.378, 106.834, 7.0)).unwrap();
        assert!((q.signed() + 64.79325).abs() < 0.01);
        assert!((q.degrees() - 295.20675).abs() < 0.01);
    }

    #[test]
    fn test_kaaba_is_degenerate() {
        assert_eq!(qibla_bearing(&Location::new_unchecked(21.4233, 39.8233, 3.0)), None);
    }

    #[test]
    fn test_due_directions() {
        // Straight south of the Kaaba on its meridian the bearing is north.
        let south = qibla_bearing(&Location::new_unchecked(-10.0, KAABA_LONGITUDE, 3.0)).unwrap();
        assert!(south.degrees().abs() < 1e-9 || (south.degrees() - 360.0).abs() < 1e-9);

        // Straight north of it the bearing is south.
        let north = qibla_bearing(&Location::new_unchecked(45.0, KAABA_LONGITUDE, 3.0)).unwrap();
        assert!((north.degrees() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_east_and_west() {
        let casablanca = qibla_bearing(&Location::new_unchecked(33.57, -7.59, 1.0)).unwrap();
        assert!((80.0..110.0).contains(&casablanca.degrees()));

        let karachi = qibla_bearing(&Location::new_unchecked(24.86, 67.0, 5.0)).unwrap();
        assert!((260.0..275.0).contains(&karachi.degrees()));
    }
}
