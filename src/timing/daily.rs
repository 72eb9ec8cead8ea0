use serde::{Deserialize, Serialize};

use super::{error::ScheduleError, local_time::LocalTime};

/// Hours for a single day, in the shape schedules are stored in:
/// `{ "isOpen": true, "open": "09:00", "close": "17:00" }`.
///
/// The times are kept as written and only parsed when evaluated. A closed day
/// never has its times looked at, so junk there is harmless.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Daily {
    #[serde(rename = "isOpen")]
    open: bool,
    #[serde(rename = "open", default, skip_serializing_if = "Option::is_none")]
    opening: Option<String>,
    #[serde(rename = "close", default, skip_serializing_if = "Option::is_none")]
    closing: Option<String>,
}

impl Daily {
    pub fn new_open(opening: &str, closing: &str) -> Self {
        Self {
            open: true,
            opening: Some(opening.to_string()),
            closing: Some(closing.to_string()),
        }
    }

    pub fn new_closed() -> Self {
        Self {
            open: false,
            opening: None,
            closing: None,
        }
    }

    pub fn open(&self) -> bool {
        self.open
    }

    pub fn opening(&self) -> Option<&str> {
        self.opening.as_deref()
    }

    pub fn closing(&self) -> Option<&str> {
        self.closing.as_deref()
    }

    /// Parsed `(open, close)` for an open day, `None` for a closed one.
    ///
    /// `day` is only used to name the day in the error.
    pub fn interval(&self, day: &'static str) -> Result<Option<(LocalTime, LocalTime)>, ScheduleError> {
        if !self.open {
            return Ok(None);
        }
        let opening = self
            .opening
            .as_deref()
            .ok_or(ScheduleError::MissingBound { day, bound: "open" })?;
        let closing = self
            .closing
            .as_deref()
            .ok_or(ScheduleError::MissingBound { day, bound: "close" })?;
        Ok(Some((opening.parse()?, closing.parse()?)))
    }
}
