//! Time-of-day arithmetic on a 24-hour wall clock.
//!
//! Visit slots carry wall-clock times only (`HH:MM`). Adding a duration wraps
//! modulo 1440 minutes; the number of midnights crossed is reported separately
//! so callers can decide whether a wrap is acceptable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time, stored as minutes since midnight in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const NINE_AM: TimeOfDay = TimeOfDay(9 * 60);

    /// Build from hour and minute. Returns `None` outside `00:00..=23:59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(TimeOfDay(hour * 60 + minute))
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.0
    }

    /// Add `minutes` and wrap at midnight.
    ///
    /// Returns the wrapped time together with the number of day boundaries the
    /// addition crossed. `(h·60 + m + minutes) mod 1440` is the wrapped value.
    pub fn add_minutes(self, minutes: u32) -> (TimeOfDay, u32) {
        let total = u64::from(self.0) + u64::from(minutes);
        let per_day = u64::from(MINUTES_PER_DAY);
        (TimeOfDay((total % per_day) as u32), (total / per_day) as u32)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::config(format!("invalid time of day '{}', expected HH:MM", s));

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
