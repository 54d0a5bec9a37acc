//! Extreme-latitude fallback policies.
//!
//! Entered when an event has no solution (or the policy runs on every day).
//! Each policy patches the decimal-hour results and records which events it
//! produced, so callers can flag them as approximations.

use log::{debug, warn};
use miqat_astronomy::{to_topocentric, EphemerisCache, EphemerisWindow};
use miqat_types::{ExtremeMethod, Location, Method, Prayer};

use crate::solver::{solve_base, twilight_hours, RawTimes};

/// Which daily events came from a fallback policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtremeFlags([bool; 6]);

impl ExtremeFlags {
    fn index(prayer: Prayer) -> usize {
        prayer.daily_index().unwrap_or(0)
    }

    pub fn mark(&mut self, prayer: Prayer) {
        self.0[Self::index(prayer)] = true;
    }

    pub fn is_set(&self, prayer: Prayer) -> bool {
        self.0[Self::index(prayer)]
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|f| *f)
    }
}

/// Whether a policy replaces an event unconditionally or only when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Always,
    Invalid,
}

/// Everything a policy may need about the day being solved.
#[derive(Debug, Clone, Copy)]
pub struct ExtremeContext<'a> {
    pub location: &'a Location,
    pub method: &'a Method,
    pub julian_day: f64,
    /// Bound on the nearest-good-day scan in each direction.
    pub days_in_year: u32,
    /// Topocentric window of the day.
    pub window: &'a EphemerisWindow,
    /// Geocentric cache positioned on `julian_day`, cloned for the scan.
    pub cache: &'a EphemerisCache,
}

struct Patch<'a> {
    times: &'a mut RawTimes,
    flags: &'a mut ExtremeFlags,
}

impl Patch<'_> {
    /// Writes `value` into `prayer` per `scope`. A missing value leaves the event untouched.
    fn put(&mut self, prayer: Prayer, value: Option<f64>, scope: Scope) {
        let Some(value) = value else { return };
        let slot = self.times.slot_mut(prayer);
        if scope == Scope::Always || slot.is_none() {
            *slot = Some(value);
            self.flags.mark(prayer);
        }
    }
}

/// Searches outward from the day, previous side first, for a day where both
/// Fajr and Ishaa solve at the true latitude. Returns that day's events.
fn nearest_good_day(ctx: &ExtremeContext<'_>) -> Option<RawTimes> {
    let mut before = ctx.cache.clone();
    let mut after = ctx.cache.clone();
    let latitude = ctx.location.latitude;

    for i in 0..=ctx.days_in_year {
        let distance = f64::from(i);
        for (cache, julian_day) in [
            (&mut before, ctx.julian_day - distance),
            (&mut after, ctx.julian_day + distance),
        ] {
            let topo = to_topocentric(&cache.ensure_window(julian_day), ctx.location);
            let declination = topo.curr().declination;
            if twilight_hours(latitude, declination, ctx.method.fajr_angle).is_some()
                && twilight_hours(latitude, declination, ctx.method.ishaa_angle).is_some()
            {
                debug!("nearest good day is JD {} ({} days away)", julian_day, i);
                return Some(solve_base(ctx.location, ctx.method, &topo));
            }
        }
    }

    warn!(
        "no day within {} days of JD {} has Fajr and Ishaa at latitude {}",
        ctx.days_in_year, ctx.julian_day, latitude
    );
    None
}

/// Applies the method's extreme-latitude policy to one day's results.
pub fn resolve(ctx: &ExtremeContext<'_>, mut times: RawTimes) -> (RawTimes, ExtremeFlags) {
    let method = ctx.method;
    let mut flags = ExtremeFlags::default();
    debug!(
        "applying extreme-latitude policy '{}' at latitude {} (JD {})",
        method.extreme, ctx.location.latitude, ctx.julian_day
    );

    let mut patch = Patch { times: &mut times, flags: &mut flags };
    let shurooq = patch.times.shurooq;
    let maghrib = patch.times.maghrib;

    match method.extreme {
        ExtremeMethod::None => {}

        ExtremeMethod::AngleBased => {
            if let (Some(sh), Some(mg)) = (shurooq, maghrib) {
                let night = 24.0 - mg + sh;
                patch.put(Prayer::Fajr, Some(sh - method.fajr_angle / 60.0 * night), Scope::Always);
                patch.put(Prayer::Ishaa, Some(mg + method.ishaa_angle / 60.0 * night), Scope::Always);
            }
        }

        ExtremeMethod::NearestLatitudeAll
        | ExtremeMethod::NearestLatitudeAlways
        | ExtremeMethod::NearestLatitudeInvalid => {
            let reference = method.nearest_latitude.copysign(ctx.location.latitude);
            let at_reference = solve_base(&ctx.location.with_latitude(reference), method, ctx.window);

            match method.extreme {
                ExtremeMethod::NearestLatitudeAll => {
                    for prayer in Prayer::DAILY {
                        patch.put(prayer, at_reference.get(prayer), Scope::Always);
                    }
                }
                ExtremeMethod::NearestLatitudeAlways => {
                    patch.put(Prayer::Fajr, at_reference.fajr, Scope::Always);
                    patch.put(Prayer::Ishaa, at_reference.ishaa, Scope::Always);
                }
                _ => {
                    patch.put(Prayer::Fajr, at_reference.fajr, Scope::Invalid);
                    patch.put(Prayer::Ishaa, at_reference.ishaa, Scope::Invalid);
                }
            }
        }

        ExtremeMethod::NearestGoodDayAll
        | ExtremeMethod::NearestGoodDayInvalid
        | ExtremeMethod::NearestGoodDayInvalidSame => {
            if let Some(good) = nearest_good_day(ctx) {
                match method.extreme {
                    ExtremeMethod::NearestGoodDayAll => {
                        for prayer in Prayer::DAILY {
                            patch.put(prayer, good.get(prayer), Scope::Always);
                        }
                    }
                    ExtremeMethod::NearestGoodDayInvalid => {
                        patch.put(Prayer::Fajr, good.fajr, Scope::Invalid);
                        patch.put(Prayer::Ishaa, good.ishaa, Scope::Invalid);
                    }
                    _ => {
                        if patch.times.fajr.is_none() || patch.times.ishaa.is_none() {
                            patch.put(Prayer::Fajr, good.fajr, Scope::Always);
                            patch.put(Prayer::Ishaa, good.ishaa, Scope::Always);
                        }
                    }
                }
            }
        }

        policy @ (ExtremeMethod::SeventhOfNightAlways
        | ExtremeMethod::SeventhOfNightInvalid
        | ExtremeMethod::SeventhOfDayAlways
        | ExtremeMethod::SeventhOfDayInvalid) => {
            if let (Some(sh), Some(mg)) = (shurooq, maghrib) {
                let (portion, scope) = match policy {
                    ExtremeMethod::SeventhOfNightAlways => ((24.0 - (mg - sh)) / 7.0, Scope::Always),
                    ExtremeMethod::SeventhOfNightInvalid => ((24.0 - (mg - sh)) / 7.0, Scope::Invalid),
                    ExtremeMethod::SeventhOfDayAlways => ((mg - sh) / 7.0, Scope::Always),
                    _ => ((mg - sh) / 7.0, Scope::Invalid),
                };
                patch.put(Prayer::Fajr, Some(sh - portion), scope);
                patch.put(Prayer::Ishaa, Some(mg + portion), scope);
            }
        }

        policy @ (ExtremeMethod::HalfOfNightAlways | ExtremeMethod::HalfOfNightInvalid) => {
            if let (Some(sh), Some(mg)) = (shurooq, maghrib) {
                let scope = if policy == ExtremeMethod::HalfOfNightAlways { Scope::Always } else { Scope::Invalid };
                let midnight = (mg + 24.0 + sh) / 2.0;
                patch.put(Prayer::Fajr, Some(midnight - f64::from(method.fajr_interval) / 60.0), scope);
                patch.put(Prayer::Ishaa, Some(midnight + f64::from(method.ishaa_interval) / 60.0), scope);
            }
        }

        ExtremeMethod::MinutesAlways => {
            // The intervals are applied afterwards, like for any other policy.
            patch.put(Prayer::Fajr, shurooq, Scope::Always);
            patch.put(Prayer::Ishaa, maghrib, Scope::Always);
        }

        ExtremeMethod::MinutesInvalid => {
            // The intervals count as exact minutes; they are not truncated to whole hours.
            let fajr = shurooq.map(|sh| sh - f64::from(method.fajr_interval) / 60.0);
            let ishaa = maghrib.map(|mg| mg + f64::from(method.ishaa_interval) / 60.0);
            patch.put(Prayer::Fajr, fajr, Scope::Invalid);
            patch.put(Prayer::Ishaa, ishaa, Scope::Invalid);
        }
    }

    (times, flags)
}
