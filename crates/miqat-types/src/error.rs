//! Error types for miqat operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from miqat configuration and lookup.
///
/// The solver itself never fails: an event with no astronomical solution is
/// reported through [`PrayerTime::is_valid`](crate::PrayerTime::is_valid).
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiqatError {
    /// Location outside the supported coordinate ranges.
    #[error("Invalid location: {reason}")]
    InvalidLocation { reason: String },

    /// Method parameters that cannot describe a calculation convention.
    #[error("Invalid method: {reason}")]
    InvalidMethod { reason: String },

    /// Asr shadow ratio that matches no school.
    #[error("Asr shadow ratio {0} is not supported (expected 1 or 2)")]
    InvalidShadowRatio(u8),

    /// Method identifier missing from a method table.
    #[error("Unknown calculation method '{0}'")]
    UnknownMethod(String),

    /// Malformed configuration document.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MiqatError {
    /// Creates an `InvalidLocation` error.
    pub fn invalid_location(reason: impl Into<String>) -> Self {
        Self::InvalidLocation { reason: reason.into() }
    }

    /// Creates an `InvalidMethod` error.
    pub fn invalid_method(reason: impl Into<String>) -> Self {
        Self::InvalidMethod { reason: reason.into() }
    }

    /// Creates a `Config` error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }
}
