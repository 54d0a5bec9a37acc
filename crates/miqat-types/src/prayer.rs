//! Prayer events and their clock times.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// The events the engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    Fajr,
    Shurooq,
    Zuhr,
    Asr,
    Maghrib,
    Ishaa,
    Imsaak,
    NextFajr,
}

impl Prayer {
    /// The six daily events, in order.
    pub const DAILY: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Shurooq,
        Prayer::Zuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Ishaa,
    ];

    /// Position among the daily events, `None` for Imsaak and next-day Fajr.
    pub fn daily_index(&self) -> Option<usize> {
        Prayer::DAILY.iter().position(|p| p == self)
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Prayer::Fajr => "Fajr",
            Prayer::Shurooq => "Shurooq",
            Prayer::Zuhr => "Zuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Ishaa => "Ishaa",
            Prayer::Imsaak => "Imsaak",
            Prayer::NextFajr => "Fajr (next day)",
        };
        write!(f, "{}", s)
    }
}

/// Local clock time of one event.
///
/// `hour == minute == 99` marks an event with no solution under the method.
/// `extreme` is set when an extreme-latitude policy produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrayerTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub extreme: bool,
}

impl PrayerTime {
    /// Hour and minute value of an unsolvable event.
    pub const UNSOLVABLE: u8 = 99;

    pub const fn new(hour: u8, minute: u8, second: u8, extreme: bool) -> Self {
        Self { hour, minute, second, extreme }
    }

    pub const fn unsolvable(extreme: bool) -> Self {
        Self { hour: Self::UNSOLVABLE, minute: Self::UNSOLVABLE, second: 0, extreme }
    }

    pub fn is_valid(&self) -> bool {
        self.hour != Self::UNSOLVABLE
    }

    pub fn is_extreme(&self) -> bool {
        self.extreme
    }

    /// Seconds since local midnight, `None` when unsolvable.
    pub fn seconds_of_day(&self) -> Option<u32> {
        self.is_valid()
            .then(|| u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second))
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        if !self.is_valid() {
            return None;
        }
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), self.second.into())
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "--:--");
        }
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.extreme {
            write!(f, " (extreme)")?;
        }
        Ok(())
    }
}

/// The six daily events for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: PrayerTime,
    pub shurooq: PrayerTime,
    pub zuhr: PrayerTime,
    pub asr: PrayerTime,
    pub maghrib: PrayerTime,
    pub ishaa: PrayerTime,
}

impl PrayerTimes {
    /// Builds from an array in [`Prayer::DAILY`] order.
    pub fn from_array(times: [PrayerTime; 6]) -> Self {
        let [fajr, shurooq, zuhr, asr, maghrib, ishaa] = times;
        Self { fajr, shurooq, zuhr, asr, maghrib, ishaa }
    }

    pub fn to_array(&self) -> [PrayerTime; 6] {
        [self.fajr, self.shurooq, self.zuhr, self.asr, self.maghrib, self.ishaa]
    }

    /// Time of a daily event; `None` for Imsaak and next-day Fajr.
    pub fn get(&self, prayer: Prayer) -> Option<PrayerTime> {
        prayer.daily_index().map(|i| self.to_array()[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> {
        Prayer::DAILY.into_iter().zip(self.to_array())
    }

    /// Events produced by an extreme-latitude policy.
    pub fn extreme_events(&self) -> SmallVec<[Prayer; 6]> {
        self.iter().filter(|(_, t)| t.extreme).map(|(p, _)| p).collect()
    }

    pub fn all_valid(&self) -> bool {
        self.iter().all(|(_, t)| t.is_valid())
    }
}

impl fmt::Display for PrayerTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (prayer, time)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<8} {}", prayer, time)?;
        }
        Ok(())
    }
}
