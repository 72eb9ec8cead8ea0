use thiserror::Error;

/// Everything that can go wrong while reading or evaluating a schedule.
///
/// None of these reach the caller of `BusinessHours::is_open`: they are turned
/// into the permissive "Unable to determine hours" status there.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("'{0}' is not a zero-padded HH:MM time")]
    MalformedTime(String),

    #[error("{day} is marked open but has no {bound} time")]
    MissingBound { day: &'static str, bound: &'static str },

    #[error("schedule must be a JSON object keyed by day name")]
    NotAnObject,

    #[error("could not read the entry for {day}: {source}")]
    MalformedEntry {
        day: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
