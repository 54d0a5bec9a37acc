//! Calculation conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Madhab, MiqatError, Prayer};

/// Default reference latitude for the nearest-latitude policies.
pub const DEFAULT_NEAREST_LATITUDE: f64 = 48.5;
/// Default latitude beyond which Fajr and Ishaa always go through the extreme policy.
pub const DEFAULT_EXTREME_LATITUDE: f64 = 55.0;
/// Default extra depression for Imsaak, on top of the Fajr angle.
pub const DEFAULT_IMSAAK_ANGLE: f64 = 1.5;

/// How decimal times are rounded to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Keep the computed seconds.
    None,
    /// Round every event to the nearest minute.
    Normal,
    /// Round prayers to the nearest minute; Shurooq and Imsaak are truncated.
    Special,
    /// Like `Special`, but any leftover second rounds up.
    Aggressive,
}

impl Default for Rounding {
    fn default() -> Self {
        Self::Special
    }
}

/// Fallback policy for days where Fajr or Ishaa has no solution.
///
/// `*Always` and `*All` variants run on every day; `*Invalid` variants only
/// replace the events that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremeMethod {
    /// Leave unsolvable events as they are.
    None,
    /// Re-solve every event except Zuhr at the reference latitude.
    NearestLatitudeAll,
    /// Re-solve Fajr and Ishaa at the reference latitude.
    NearestLatitudeAlways,
    /// Re-solve only the failed Fajr/Ishaa at the reference latitude.
    NearestLatitudeInvalid,
    /// Copy all six events from the nearest day where Fajr and Ishaa both solve.
    NearestGoodDayAll,
    /// Copy only the failed Fajr/Ishaa from the nearest good day.
    NearestGoodDayInvalid,
    /// Copy both Fajr and Ishaa from the nearest good day when either failed.
    NearestGoodDayInvalidSame,
    /// Fajr and Ishaa one seventh of the night from Shurooq and Maghrib.
    SeventhOfNightAlways,
    SeventhOfNightInvalid,
    /// Fajr and Ishaa one seventh of the day from Shurooq and Maghrib.
    SeventhOfDayAlways,
    SeventhOfDayInvalid,
    /// Fajr and Ishaa measured by their intervals from the middle of the night.
    HalfOfNightAlways,
    HalfOfNightInvalid,
    /// Fajr and Ishaa at Shurooq and Maghrib, shifted by the method intervals.
    MinutesAlways,
    MinutesInvalid,
    /// Fajr and Ishaa as a share of the night proportional to their angles.
    AngleBased,
}

impl Default for ExtremeMethod {
    fn default() -> Self {
        Self::NearestGoodDayInvalid
    }
}

impl ExtremeMethod {
    /// True for policies that replace events even on days where everything solves.
    pub fn always_applies(&self) -> bool {
        matches!(
            self,
            ExtremeMethod::NearestLatitudeAll
                | ExtremeMethod::NearestLatitudeAlways
                | ExtremeMethod::NearestGoodDayAll
                | ExtremeMethod::SeventhOfNightAlways
                | ExtremeMethod::SeventhOfDayAlways
                | ExtremeMethod::HalfOfNightAlways
                | ExtremeMethod::MinutesAlways
        )
    }

    /// True for policies that consume the Fajr/Ishaa intervals themselves.
    pub fn consumes_intervals(&self) -> bool {
        matches!(
            self,
            ExtremeMethod::MinutesInvalid
                | ExtremeMethod::HalfOfNightInvalid
                | ExtremeMethod::HalfOfNightAlways
        )
    }
}

impl fmt::Display for ExtremeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtremeMethod::None => "none",
            ExtremeMethod::NearestLatitudeAll => "nearest latitude (all)",
            ExtremeMethod::NearestLatitudeAlways => "nearest latitude (always)",
            ExtremeMethod::NearestLatitudeInvalid => "nearest latitude (if invalid)",
            ExtremeMethod::NearestGoodDayAll => "nearest good day (all)",
            ExtremeMethod::NearestGoodDayInvalid => "nearest good day (if invalid)",
            ExtremeMethod::NearestGoodDayInvalidSame => "nearest good day (both if invalid)",
            ExtremeMethod::SeventhOfNightAlways => "seventh of night (always)",
            ExtremeMethod::SeventhOfNightInvalid => "seventh of night (if invalid)",
            ExtremeMethod::SeventhOfDayAlways => "seventh of day (always)",
            ExtremeMethod::SeventhOfDayInvalid => "seventh of day (if invalid)",
            ExtremeMethod::HalfOfNightAlways => "half of night (always)",
            ExtremeMethod::HalfOfNightInvalid => "half of night (if invalid)",
            ExtremeMethod::MinutesAlways => "minutes from shurooq/maghrib (always)",
            ExtremeMethod::MinutesInvalid => "minutes from shurooq/maghrib (if invalid)",
            ExtremeMethod::AngleBased => "angle based",
        };
        write!(f, "{}", s)
    }
}

/// Per-event minute offsets, applied when [`Method::offsets_enabled`] is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offsets {
    pub fajr: f64,
    pub shurooq: f64,
    pub zuhr: f64,
    pub asr: f64,
    pub maghrib: f64,
    pub ishaa: f64,
}

impl Offsets {
    /// Offset in minutes for an event. Imsaak and next-day Fajr share the Fajr slot.
    pub fn get(&self, prayer: Prayer) -> f64 {
        match prayer {
            Prayer::Fajr | Prayer::Imsaak | Prayer::NextFajr => self.fajr,
            Prayer::Shurooq => self.shurooq,
            Prayer::Zuhr => self.zuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Ishaa => self.ishaa,
        }
    }

    pub fn set(&mut self, prayer: Prayer, minutes: f64) {
        match prayer {
            Prayer::Fajr | Prayer::Imsaak | Prayer::NextFajr => self.fajr = minutes,
            Prayer::Shurooq => self.shurooq = minutes,
            Prayer::Zuhr => self.zuhr = minutes,
            Prayer::Asr => self.asr = minutes,
            Prayer::Maghrib => self.maghrib = minutes,
            Prayer::Ishaa => self.ishaa = minutes,
        }
    }

    fn all(&self) -> [f64; 6] {
        [self.fajr, self.shurooq, self.zuhr, self.asr, self.maghrib, self.ishaa]
    }
}

/// A calculation convention.
///
/// The solver reads these fields as plain numbers; named conventions only
/// differ in the values they carry. Intervals are in minutes and take
/// precedence over the matching angle when non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    /// Sun depression for Fajr, degrees.
    pub fajr_angle: f64,
    /// Sun depression for Ishaa, degrees.
    pub ishaa_angle: f64,
    /// Extra depression for Imsaak, degrees.
    pub imsaak_angle: f64,
    /// Fajr this many minutes before Shurooq (0 = use the angle).
    pub fajr_interval: u32,
    /// Ishaa this many minutes after Maghrib (0 = use the angle).
    pub ishaa_interval: u32,
    /// Imsaak this many minutes before Fajr (0 = use the angle).
    pub imsaak_interval: u32,
    pub madhab: Madhab,
    pub rounding: Rounding,
    pub extreme: ExtremeMethod,
    /// Reference latitude for the nearest-latitude policies, degrees.
    pub nearest_latitude: f64,
    /// Beyond this absolute latitude Fajr and Ishaa are always treated as unsolvable.
    ///
    /// Both hemispheres are treated alike: -56° is beyond a 55° limit just as 56° is.
    pub extreme_latitude: f64,
    pub offsets_enabled: bool,
    pub offsets: Offsets,
    /// Enables the Moonsighting Committee seasonal Fajr/Ishaa curve.
    pub seasonal_adjustment: bool,
}

impl Default for Method {
    fn default() -> Self {
        Self {
            fajr_angle: 0.0,
            ishaa_angle: 0.0,
            imsaak_angle: DEFAULT_IMSAAK_ANGLE,
            fajr_interval: 0,
            ishaa_interval: 0,
            imsaak_interval: 0,
            madhab: Madhab::default(),
            rounding: Rounding::default(),
            extreme: ExtremeMethod::default(),
            nearest_latitude: DEFAULT_NEAREST_LATITUDE,
            extreme_latitude: DEFAULT_EXTREME_LATITUDE,
            offsets_enabled: false,
            offsets: Offsets::default(),
            seasonal_adjustment: false,
        }
    }
}

impl Method {
    /// Convention with the given twilight angles and every other field at its default.
    pub fn from_angles(fajr_angle: f64, ishaa_angle: f64) -> Self {
        Self { fajr_angle, ishaa_angle, ..Self::default() }
    }

    pub fn builder() -> MethodBuilder {
        MethodBuilder::new()
    }

    /// Continues building from this method's values.
    pub fn to_builder(&self) -> MethodBuilder {
        MethodBuilder { method: *self }
    }

    /// Offset in hours that normalization adds to an event, zero when offsets are off.
    pub fn offset_hours(&self, prayer: Prayer) -> f64 {
        if self.offsets_enabled {
            self.offsets.get(prayer) / 60.0
        } else {
            0.0
        }
    }

    /// Checks that every field describes a usable convention.
    ///
    /// # Errors
    /// Returns `InvalidMethod` describing the first offending field.
    pub fn validate(&self) -> Result<(), MiqatError> {
        let angles = [
            ("fajr_angle", self.fajr_angle),
            ("ishaa_angle", self.ishaa_angle),
            ("imsaak_angle", self.imsaak_angle),
            ("nearest_latitude", self.nearest_latitude),
            ("extreme_latitude", self.extreme_latitude),
        ];
        for (name, value) in angles {
            if !(0.0..=90.0).contains(&value) {
                return Err(MiqatError::invalid_method(format!(
                    "{} {} out of range [0, 90]",
                    name, value
                )));
            }
        }

        let intervals = [
            ("fajr_interval", self.fajr_interval),
            ("ishaa_interval", self.ishaa_interval),
            ("imsaak_interval", self.imsaak_interval),
        ];
        for (name, value) in intervals {
            if value >= 24 * 60 {
                return Err(MiqatError::invalid_method(format!(
                    "{} of {} minutes is a day or longer",
                    name, value
                )));
            }
        }

        if self.offsets.all().iter().any(|m| !m.is_finite() || m.abs() >= 24.0 * 60.0) {
            return Err(MiqatError::invalid_method("Offsets must be finite and shorter than a day"));
        }
        Ok(())
    }
}

/// Builder with validation for `Method`.
#[derive(Debug, Clone, Default)]
pub struct MethodBuilder {
    method: Method,
}

impl MethodBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn fajr_angle(mut self, degrees: f64) -> Self { self.method.fajr_angle = degrees; self }
    pub fn ishaa_angle(mut self, degrees: f64) -> Self { self.method.ishaa_angle = degrees; self }
    pub fn imsaak_angle(mut self, degrees: f64) -> Self { self.method.imsaak_angle = degrees; self }
    pub fn fajr_interval(mut self, minutes: u32) -> Self { self.method.fajr_interval = minutes; self }
    pub fn ishaa_interval(mut self, minutes: u32) -> Self { self.method.ishaa_interval = minutes; self }
    pub fn imsaak_interval(mut self, minutes: u32) -> Self { self.method.imsaak_interval = minutes; self }
    pub fn madhab(mut self, madhab: Madhab) -> Self { self.method.madhab = madhab; self }
    pub fn rounding(mut self, rounding: Rounding) -> Self { self.method.rounding = rounding; self }
    pub fn extreme(mut self, extreme: ExtremeMethod) -> Self { self.method.extreme = extreme; self }
    pub fn nearest_latitude(mut self, degrees: f64) -> Self { self.method.nearest_latitude = degrees; self }
    pub fn extreme_latitude(mut self, degrees: f64) -> Self { self.method.extreme_latitude = degrees; self }
    pub fn seasonal_adjustment(mut self, enabled: bool) -> Self { self.method.seasonal_adjustment = enabled; self }

    /// Sets the minute offset for one event and turns offsets on.
    pub fn offset(mut self, prayer: Prayer, minutes: f64) -> Self {
        self.method.offsets.set(prayer, minutes);
        self.method.offsets_enabled = true;
        self
    }

    /// Asr school from a raw shadow ratio.
    ///
    /// # Errors
    /// Returns `InvalidShadowRatio` unless the ratio is 1 or 2.
    pub fn shadow_ratio(mut self, ratio: u8) -> Result<Self, MiqatError> {
        self.method.madhab = Madhab::from_shadow_ratio(ratio)?;
        Ok(self)
    }

    /// Builds and validates.
    pub fn build(self) -> Result<Method, MiqatError> {
        self.method.validate()?;
        Ok(self.method)
    }
}
