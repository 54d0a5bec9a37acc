//! # Miqat
//!
//! Islamic prayer times and Qibla direction computed from the VSOP87D
//! solar ephemeris, with topocentric correction and the classic
//! extreme-latitude fallback policies.
//!
//! This crate is a facade that re-exports functionality from the `miqat` ecosystem.
//!
//! ## Modules
//!
//! - `types`: Core types (Location, Method, PrayerTimes, QiblaBearing, etc.)
//! - `astronomy`: Julian Day, solar ephemeris, topocentric correction, rise/set
//! - `rules`: Prayer angle solver, extreme-latitude policies, normalization
//!
//! ## Usage
//!
//! ```rust
//! use miqat::prelude::*;
//!
//! let jakarta = Location::new(-6.3781, 106.8342, 7.0).unwrap();
//! let method = StandardMethod::EgyptSurvey.method();
//! let times = compute_prayer_times(&jakarta, &method, CivilDate::new(2016, 12, 2));
//! assert_eq!(times.fajr.to_string(), "04:04:00");
//!
//! let qibla = compute_qibla(&jakarta).unwrap();
//! assert!((qibla.degrees() - 295.2).abs() < 0.1);
//! ```

pub use miqat_core::*;
