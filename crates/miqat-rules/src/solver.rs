//! Hour-angle equations for the daily events.
//!
//! All results are decimal hours of local time. `None` means the Sun never
//! reaches the required altitude on that day.

use miqat_astronomy::{rise_set, transit, EphemerisWindow, HorizonEvent};
use miqat_types::{Location, Madhab, Method, Prayer};

/// Decimal-hour times of the six daily events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawTimes {
    pub fajr: Option<f64>,
    pub shurooq: Option<f64>,
    pub zuhr: Option<f64>,
    pub asr: Option<f64>,
    pub maghrib: Option<f64>,
    pub ishaa: Option<f64>,
}

impl RawTimes {
    pub fn get(&self, prayer: Prayer) -> Option<f64> {
        match prayer {
            Prayer::Fajr | Prayer::Imsaak | Prayer::NextFajr => self.fajr,
            Prayer::Shurooq => self.shurooq,
            Prayer::Zuhr => self.zuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Ishaa => self.ishaa,
        }
    }

    pub fn slot_mut(&mut self, prayer: Prayer) -> &mut Option<f64> {
        match prayer {
            Prayer::Fajr | Prayer::Imsaak | Prayer::NextFajr => &mut self.fajr,
            Prayer::Shurooq => &mut self.shurooq,
            Prayer::Zuhr => &mut self.zuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Ishaa => &mut self.ishaa,
        }
    }
}

/// Solves `cos(H) = numerator / (cos(lat) * cos(dec))` for H in hours.
fn hour_angle_hours(sin_altitude: f64, latitude: f64, declination: f64) -> Option<f64> {
    let (lat, dec) = (latitude.to_radians(), declination.to_radians());
    let cos_h = (sin_altitude - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    Some(cos_h.acos().to_degrees() / 15.0)
}

/// Hours between transit and the Sun reaching `angle` degrees below the horizon.
pub fn twilight_hours(latitude: f64, declination: f64, angle: f64) -> Option<f64> {
    hour_angle_hours((-angle).to_radians().sin(), latitude, declination)
}

/// Hours between transit and the start of Asr.
///
/// Asr begins when an object's shadow exceeds its noon shadow by the school's
/// shadow ratio times its height.
pub fn asr_hours(latitude: f64, declination: f64, madhab: Madhab) -> Option<f64> {
    let noon_zenith = (latitude.to_radians() - declination.to_radians()).abs();
    let altitude = (1.0 / (madhab.shadow_ratio() + noon_zenith.tan())).atan();
    hour_angle_hours(altitude.sin(), latitude, declination)
}

/// Solves all six events for the day the topocentric `window` is centered on.
pub fn solve_base(location: &Location, method: &Method, window: &EphemerisWindow) -> RawTimes {
    let latitude = location.latitude;
    let declination = window.curr().declination;
    let zuhr = transit(location.longitude, window);

    RawTimes {
        fajr: twilight_hours(latitude, declination, method.fajr_angle).map(|h| zuhr - h),
        shurooq: rise_set(location, window, HorizonEvent::Rise),
        zuhr: Some(zuhr),
        asr: asr_hours(latitude, declination, method.madhab).map(|h| zuhr + h),
        maghrib: rise_set(location, window, HorizonEvent::Set),
        ishaa: twilight_hours(latitude, declination, method.ishaa_angle).map(|h| zuhr + h),
    }
}
