//! Solar astronomy for Miqat.
//!
//! Provides the Julian Day conversion, a VSOP87D solar ephemeris with nutation
//! and aberration, the three-day window cache, topocentric parallax,
//! the transit and rise/set solvers, and the Qibla bearing.
//!
//! Reference: Jean Meeus, "Astronomical Algorithms", Chapters 7, 12, 13, 15, 22, 25, 32, 40.

pub mod angle;
pub mod ephemeris;
pub mod julian;
pub mod qibla;
pub mod riseset;
pub mod topocentric;
pub mod window;

mod tables;

pub use ephemeris::{compute_ephemeris, geocentric_sun, DayEphemeris};
pub use julian::julian_day;
pub use qibla::qibla_bearing;
pub use riseset::{refraction, rise_set, transit, HorizonEvent};
pub use topocentric::to_topocentric;
pub use window::{EphemerisCache, EphemerisWindow};
