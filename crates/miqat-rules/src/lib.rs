//! Prayer-time rules for Miqat.
//!
//! Turns a topocentric ephemeris window into clock times: the hour-angle
//! equations for each event, the Moonsighting Committee seasonal curve, the
//! extreme-latitude fallback policies and the final time normalization.

pub mod day;
pub mod extreme;
pub mod normalize;
pub mod seasonal;
pub mod solver;

pub use day::{
    compute_day, imsaak, next_day_fajr, next_day_imsaak, prayer_times, DayRequest, DayResult,
    DEFAULT_IMSAAK_INTERVAL,
};
pub use extreme::{resolve, ExtremeContext, ExtremeFlags};
pub use normalize::normalize;
pub use solver::{asr_hours, solve_base, twilight_hours, RawTimes};
