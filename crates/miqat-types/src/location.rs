//! Observer location.

use serde::{Deserialize, Serialize};

use crate::MiqatError;

/// Default atmospheric pressure in millibars.
pub const DEFAULT_PRESSURE: f64 = 1010.0;
/// Default air temperature in degrees Celsius.
pub const DEFAULT_TEMPERATURE: f64 = 10.0;

/// Observer position and local clock settings.
///
/// A `Location` is read-only for the duration of a computation. Fallback
/// policies that need a different latitude work on a copy made with
/// [`Location::with_latitude`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees, positive north. Range [-90, 90].
    pub latitude: f64,
    /// Degrees, positive east. Range [-180, 180].
    pub longitude: f64,
    /// Hours east of UTC.
    pub utc_offset: f64,
    /// Daylight saving shift in hours (0 when not in effect).
    #[serde(default)]
    pub dst: f64,
    /// Meters above sea level. Default: 0.0
    #[serde(default)]
    pub elevation: f64,
    /// Millibars. Default: 1010.0
    #[serde(default = "default_pressure")]
    pub pressure: f64,
    /// Degrees Celsius. Default: 10.0
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_pressure() -> f64 {
    DEFAULT_PRESSURE
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl Location {
    /// Creates a validated location at sea level with standard atmosphere.
    ///
    /// # Errors
    /// Returns `InvalidLocation` if a coordinate is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64, utc_offset: f64) -> Result<Self, MiqatError> {
        let location = Self::new_unchecked(latitude, longitude, utc_offset);
        location.validate()?;
        Ok(location)
    }

    /// Creates a location without validation. Use with trusted inputs only.
    #[inline]
    pub const fn new_unchecked(latitude: f64, longitude: f64, utc_offset: f64) -> Self {
        Self {
            latitude,
            longitude,
            utc_offset,
            dst: 0.0,
            elevation: 0.0,
            pressure: DEFAULT_PRESSURE,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Starts a builder for the given coordinates.
    pub fn builder(latitude: f64, longitude: f64) -> LocationBuilder {
        LocationBuilder::new(latitude, longitude)
    }

    /// Sets the daylight saving shift (hours).
    pub fn with_dst(mut self, dst: f64) -> Self {
        self.dst = dst;
        self
    }

    /// Sets the elevation (meters above sea level).
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Returns a copy observed from another latitude, everything else unchanged.
    pub fn with_latitude(mut self, latitude: f64) -> Self {
        self.latitude = latitude;
        self
    }

    /// Checks the coordinate and atmosphere invariants.
    ///
    /// # Errors
    /// Returns `InvalidLocation` describing the first violated invariant.
    pub fn validate(&self) -> Result<(), MiqatError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(MiqatError::invalid_location(format!(
                "Latitude {} out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(MiqatError::invalid_location(format!(
                "Longitude {} out of range [-180, 180]",
                self.longitude
            )));
        }
        if !(-14.0..=14.0).contains(&self.utc_offset) {
            return Err(MiqatError::invalid_location(format!(
                "UTC offset {} out of range [-14, 14]",
                self.utc_offset
            )));
        }
        if !(-12.0..=12.0).contains(&self.dst) {
            return Err(MiqatError::invalid_location(format!(
                "DST shift {} out of range [-12, 12]",
                self.dst
            )));
        }
        if !self.elevation.is_finite() {
            return Err(MiqatError::invalid_location("Elevation must be finite"));
        }
        if !self.pressure.is_finite() || self.pressure < 0.0 {
            return Err(MiqatError::invalid_location(format!(
                "Pressure {} must be a non-negative number of millibars",
                self.pressure
            )));
        }
        if !self.temperature.is_finite() || self.temperature <= -273.0 {
            return Err(MiqatError::invalid_location(format!(
                "Temperature {} is below absolute zero",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Builder with validation for `Location`.
#[derive(Debug, Clone)]
pub struct LocationBuilder {
    latitude: f64,
    longitude: f64,
    utc_offset: f64,
    dst: f64,
    elevation: f64,
    pressure: f64,
    temperature: f64,
}

impl LocationBuilder {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            utc_offset: 0.0,
            dst: 0.0,
            elevation: 0.0,
            pressure: DEFAULT_PRESSURE,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn utc_offset(mut self, hours: f64) -> Self { self.utc_offset = hours; self }
    pub fn dst(mut self, hours: f64) -> Self { self.dst = hours; self }
    pub fn elevation(mut self, meters: f64) -> Self { self.elevation = meters; self }
    pub fn pressure(mut self, millibars: f64) -> Self { self.pressure = millibars; self }
    pub fn temperature(mut self, celsius: f64) -> Self { self.temperature = celsius; self }

    /// Builds and validates.
    pub fn build(self) -> Result<Location, MiqatError> {
        let location = Location {
            latitude: self.latitude,
            longitude: self.longitude,
            utc_offset: self.utc_offset,
            dst: self.dst,
            elevation: self.elevation,
            pressure: self.pressure,
            temperature: self.temperature,
        };
        location.validate()?;
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Location::new(91.0, 0.0, 0.0).is_err());
        assert!(Location::new(0.0, -180.5, 0.0).is_err());
        assert!(Location::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(Location::new(-6.3781, 106.8342, 7.0).is_ok());
    }

    #[test]
    fn test_builder_defaults() {
        let loc = Location::builder(21.42, 39.82).utc_offset(3.0).build().unwrap();
        assert_eq!(loc.pressure, 1010.0);
        assert_eq!(loc.temperature, 10.0);
        assert_eq!(loc.elevation, 0.0);
        assert_eq!(loc.dst, 0.0);
    }

    #[test]
    fn test_builder_validates_atmosphere() {
        let err = Location::builder(0.0, 0.0).temperature(-300.0).build();
        assert!(matches!(err, Err(MiqatError::InvalidLocation { .. })));
    }

    #[test]
    fn test_with_latitude_is_a_copy() {
        let original = Location::new_unchecked(65.0, 18.0, 1.0);
        let moved = original.with_latitude(48.5);
        assert_eq!(original.latitude, 65.0);
        assert_eq!(moved.latitude, 48.5);
        assert_eq!(moved.longitude, original.longitude);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let loc: Location =
            serde_json::from_str(r#"{"latitude": 30.0, "longitude": 31.0, "utc_offset": 2.0}"#).unwrap();
        assert_eq!(loc.pressure, 1010.0);
        assert_eq!(loc.temperature, 10.0);
    }
}
