use serde::Serialize;

use crate::{locations::Location, timing::Status};

/// Body of `/api/status`.
#[derive(Serialize)]
pub struct StatusResponse<'a> {
    pub name: &'a str,
    pub timezone: &'a str,
    pub status: Status,
}

/// Body of `/api/hours`. `hours` is one `[label, text]` pair per day, Monday first.
#[derive(Serialize)]
pub struct HoursResponse<'a> {
    pub name: &'a str,
    pub timezone: &'a str,
    pub hours: Vec<(&'static str, String)>,
}

/// Body of `/api/next`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextOpenResponse<'a> {
    pub name: &'a str,
    pub next_open: Option<String>,
}

/// One entry of `/api/locations`.
#[derive(Serialize)]
pub struct LocationSummary<'a> {
    pub name: &'a str,
    pub timezone: &'a str,
    pub configured: bool,
}

impl<'a> From<&'a Location> for LocationSummary<'a> {
    fn from(location: &'a Location) -> Self {
        Self {
            name: &location.name,
            timezone: &location.timezone,
            configured: location.configured(),
        }
    }
}
