use std::{fmt::Display, str::FromStr};

use chrono::{NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ScheduleError;

// Fixed width on purpose: "9:00" is not accepted.
static HHMM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").unwrap());

/// A wall-clock time of day with no date or zone, stored as minutes since
/// midnight so comparisons are numeric.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    minutes: u16,
}

impl LocalTime {
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Time of day of a civil datetime, seconds dropped.
    pub fn of(datetime: &NaiveDateTime) -> Self {
        Self {
            minutes: (datetime.hour() * 60 + datetime.minute()) as u16,
        }
    }

    pub fn hour(&self) -> u16 {
        self.minutes / 60
    }

    pub fn minute(&self) -> u16 {
        self.minutes % 60
    }

    /// `h:mm AM/PM`, e.g. `00:05` -> `12:05 AM`, `13:30` -> `1:30 PM`.
    pub fn to_12_hour(&self) -> String {
        let (hour, suffix) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        format!("{}:{:02} {}", hour, self.minute(), suffix)
    }
}

impl FromStr for LocalTime {
    type Err = ScheduleError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || ScheduleError::MalformedTime(text.to_string());
        let captures = HHMM.captures(text).ok_or_else(malformed)?;
        let hour: u16 = captures[1].parse().map_err(|_| malformed())?;
        let minute: u16 = captures[2].parse().map_err(|_| malformed())?;
        Self::from_hm(hour, minute).ok_or_else(malformed)
    }
}

impl Display for LocalTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
