//! Core types for Miqat - Islamic prayer times engine.
//!
//! This crate contains pure type definitions with no astronomy or policy logic.

mod date;
mod error;
mod location;
mod madhab;
mod method;
mod prayer;
mod qibla;

pub use date::CivilDate;
pub use error::MiqatError;
pub use location::{Location, LocationBuilder};
pub use madhab::Madhab;
pub use method::{ExtremeMethod, Method, MethodBuilder, Offsets, Rounding};
pub use prayer::{Prayer, PrayerTime, PrayerTimes};
pub use qibla::{dms_to_decimal, Dms, Hemisphere, QiblaBearing, KAABA_LATITUDE, KAABA_LONGITUDE};
