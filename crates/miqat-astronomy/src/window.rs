//! Three-day ephemeris window with sliding reuse.
//!
//! Interpolating transit and rise/set needs the solar position on the day
//! before and after the requested one. Sequential queries (a month of
//! timetables) move the window by one day, so two of the three entries can be
//! reused and only the new edge is evaluated.

use log::trace;

use crate::ephemeris::{compute_ephemeris, DayEphemeris};

/// Ephemeris for `julian_day - 1`, `julian_day` and `julian_day + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisWindow {
    pub julian_day: f64,
    pub days: [DayEphemeris; 3],
}

impl EphemerisWindow {
    /// Evaluates all three days.
    pub fn compute(julian_day: f64) -> Self {
        let keys = window_keys(julian_day);
        Self { julian_day, days: keys.map(compute_ephemeris) }
    }

    pub fn prev(&self) -> &DayEphemeris {
        &self.days[0]
    }

    pub fn curr(&self) -> &DayEphemeris {
        &self.days[1]
    }

    pub fn next(&self) -> &DayEphemeris {
        &self.days[2]
    }
}

fn window_keys(julian_day: f64) -> [f64; 3] {
    [julian_day - 1.0, julian_day, julian_day + 1.0]
}

/// Caches the last window a calculator asked for.
///
/// Entries are matched on the exact Julian Day they were evaluated at, so a
/// warm cache returns bit-identical values to a cold one. A cache belongs to
/// one calculator; sharing it between threads needs external locking.
#[derive(Debug, Clone, Default)]
pub struct EphemerisCache {
    window: Option<EphemerisWindow>,
    evaluations: u64,
}

impl EphemerisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the window centered on `julian_day`, evaluating only missing days.
    pub fn ensure_window(&mut self, julian_day: f64) -> EphemerisWindow {
        let keys = window_keys(julian_day);

        let window = match self.window {
            Some(cached) if cached.julian_day.to_bits() == julian_day.to_bits() => {
                trace!("ephemeris window hit at JD {}", julian_day);
                return cached;
            }
            Some(cached) => {
                let cached_keys = window_keys(cached.julian_day);
                let mut reused = 0;
                let days = keys.map(|key| {
                    match cached_keys.iter().position(|k| k.to_bits() == key.to_bits()) {
                        Some(i) => {
                            reused += 1;
                            cached.days[i]
                        }
                        None => {
                            self.evaluations += 1;
                            compute_ephemeris(key)
                        }
                    }
                });
                trace!(
                    "ephemeris window moved from JD {} to JD {} ({} of 3 days reused)",
                    cached.julian_day, julian_day, reused
                );
                EphemerisWindow { julian_day, days }
            }
            None => {
                trace!("ephemeris window filled at JD {}", julian_day);
                self.evaluations += 3;
                EphemerisWindow::compute(julian_day)
            }
        };

        self.window = Some(window);
        window
    }

    /// Number of single-day ephemeris evaluations performed so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Center of the cached window, if any.
    pub fn center(&self) -> Option<f64> {
        self.window.map(|w| w.julian_day)
    }

    pub fn clear(&mut self) {
        self.window = None;
    }
}
