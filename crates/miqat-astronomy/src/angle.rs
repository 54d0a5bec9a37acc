//! Angle range reduction.

/// Reduces to [0, 360).
#[inline]
pub fn normalize_360(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Reduces to [0, 180).
#[inline]
pub fn normalize_180(degrees: f64) -> f64 {
    degrees.rem_euclid(180.0)
}

/// Fractional part in [0, 1).
#[inline]
pub fn fraction(value: f64) -> f64 {
    value.rem_euclid(1.0)
}

/// Reduces to [-180, 180].
#[inline]
pub fn signed_180(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    if reduced > 180.0 { reduced - 360.0 } else { reduced }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_360() {
        assert_eq!(normalize_360(370.0), 10.0);
        assert_eq!(normalize_360(-10.0), 350.0);
        assert_eq!(normalize_360(720.0), 0.0);
    }

    #[test]
    fn test_normalize_180() {
        assert_eq!(normalize_180(190.0), 10.0);
        assert_eq!(normalize_180(-30.0), 150.0);
    }

    #[test]
    fn test_fraction() {
        assert_eq!(fraction(1.25), 0.25);
        assert_eq!(fraction(-0.25), 0.75);
    }

    #[test]
    fn test_signed_180() {
        assert_eq!(signed_180(190.0), -170.0);
        assert_eq!(signed_180(-190.0), 170.0);
        assert_eq!(signed_180(180.0), 180.0);
        assert_eq!(signed_180(-45.0), -45.0);
    }
}
