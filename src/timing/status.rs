use serde::Serialize;

use super::daily::Daily;

/// The answer to "is this location open right now". Built fresh for every
/// evaluation and handed straight to the display layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub is_open: bool,
    pub message: String,
    pub today_interval: Option<Daily>,
    pub next_open_description: Option<String>,
}

impl Status {
    pub const UNKNOWN_MESSAGE: &'static str = "Unable to determine hours";

    pub fn open(message: String, today_interval: Daily) -> Self {
        Self {
            is_open: true,
            message,
            today_interval: Some(today_interval),
            next_open_description: None,
        }
    }

    pub fn closed(message: String, today_interval: Option<Daily>, next_open: Option<String>) -> Self {
        Self {
            is_open: false,
            message,
            today_interval,
            next_open_description: next_open,
        }
    }

    /// Reported when the schedule could not be evaluated. Always open: a bad
    /// entry must never block ordering or booking.
    pub fn unknown() -> Self {
        Self {
            is_open: true,
            message: Self::UNKNOWN_MESSAGE.to_string(),
            today_interval: None,
            next_open_description: None,
        }
    }
}
