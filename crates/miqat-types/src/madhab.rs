use serde::{Deserialize, Serialize};
use std::fmt;

use crate::MiqatError;

/// The four major Sunni schools of jurisprudence.
///
/// Only the Asr shadow ratio depends on the school: Hanafi uses 2, the others 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Madhab {
    Shafi,
    Hanafi,
    Maliki,
    Hanbali,
}

impl Default for Madhab {
    fn default() -> Self {
        Self::Shafi
    }
}

impl Madhab {
    /// Length of the Asr shadow relative to the object, on top of the noon shadow.
    pub fn shadow_ratio(&self) -> f64 {
        match self {
            Madhab::Hanafi => 2.0,
            Madhab::Shafi | Madhab::Maliki | Madhab::Hanbali => 1.0,
        }
    }

    /// Resolves a raw shadow ratio to a school.
    ///
    /// # Errors
    /// Returns `InvalidShadowRatio` for anything other than 1 or 2.
    pub fn from_shadow_ratio(ratio: u8) -> Result<Self, MiqatError> {
        match ratio {
            1 => Ok(Madhab::Shafi),
            2 => Ok(Madhab::Hanafi),
            other => Err(MiqatError::InvalidShadowRatio(other)),
        }
    }
}

impl fmt::Display for Madhab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Madhab::Shafi => "Shafi'i",
            Madhab::Hanafi => "Hanafi",
            Madhab::Maliki => "Maliki",
            Madhab::Hanbali => "Hanbali",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_ratio() {
        assert_eq!(Madhab::Hanafi.shadow_ratio(), 2.0);
        assert_eq!(Madhab::Maliki.shadow_ratio(), 1.0);
        assert_eq!(Madhab::default(), Madhab::Shafi);
    }

    #[test]
    fn test_from_shadow_ratio() {
        assert_eq!(Madhab::from_shadow_ratio(1), Ok(Madhab::Shafi));
        assert_eq!(Madhab::from_shadow_ratio(2), Ok(Madhab::Hanafi));
        assert_eq!(Madhab::from_shadow_ratio(3), Err(MiqatError::InvalidShadowRatio(3)));
    }
}
