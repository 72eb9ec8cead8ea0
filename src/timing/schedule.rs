use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::Value;

use super::{daily::Daily, day::Day, error::ScheduleError};

/// A weekly schedule in the location's own wall-clock time.
///
/// One slot per day, indexed by `Day`. An empty slot means closed that day,
/// the same as a `Daily` with `isOpen: false`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    timings: [Option<Daily>; 7],
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: Day, timing: Daily) -> Self {
        self.set(day, Some(timing));
        self
    }

    pub fn set(&mut self, day: Day, timing: Option<Daily>) {
        self.timings[day.index()] = timing;
    }

    pub fn get(&self, day: Day) -> Option<&Daily> {
        self.timings[day.index()].as_ref()
    }

    /// Builds a schedule from its stored JSON form, a map keyed by lowercase
    /// day name. Unknown keys and `null` entries are skipped.
    ///
    /// Run `validate_schedule` first: this only fails when an entry cannot be
    /// read at all.
    pub fn from_value(value: &Value) -> Result<Self, ScheduleError> {
        let map = value.as_object().ok_or(ScheduleError::NotAnObject)?;
        let mut schedule = Self::new();
        for day in Day::ALL {
            let Some(entry) = map.get(day.key()) else {
                continue;
            };
            if entry.is_null() {
                continue;
            }
            let timing: Daily = serde_json::from_value(entry.clone()).map_err(|source| {
                ScheduleError::MalformedEntry {
                    day: day.key(),
                    source,
                }
            })?;
            schedule.set(day, Some(timing));
        }
        Ok(schedule)
    }

    /// True when no day of the week is marked open.
    pub fn always_closed(&self) -> bool {
        Day::ALL
            .into_iter()
            .all(|day| self.get(day).map_or(true, |timing| !timing.open()))
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.timings.iter().filter(|t| t.is_some()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for day in Day::ALL {
            if let Some(timing) = self.get(day) {
                map.serialize_entry(day.key(), timing)?;
            }
        }
        map.end()
    }
}
