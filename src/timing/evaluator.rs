use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    clock::{local_datetime_at, Clock, SystemClock},
    day::Day,
    error::ScheduleError,
    local_time::LocalTime,
    schedule::Schedule,
    status::Status,
};

/// Answers "is this location open right now, and if not, when does it next
/// open" for a weekly schedule written in the location's local time.
///
/// Holds nothing but the clock, so one instance can be shared freely between
/// requests. Every day and time comparison happens on the location's civil
/// wall-clock time, not on absolute instants.
#[derive(Clone, Debug, Default)]
pub struct BusinessHours<C = SystemClock> {
    clock: C,
}

impl BusinessHours<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> BusinessHours<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Current civil date and time in `timezone`. Falls back to the system's
    /// local time when the zone is not a known IANA identifier.
    pub fn current_local_time(&self, timezone: &str) -> NaiveDateTime {
        local_datetime_at(timezone, self.clock.now())
    }

    /// Never fails: a schedule that cannot be evaluated yields
    /// `Status::unknown()`, which reports open.
    pub fn is_open(&self, schedule: &Schedule, timezone: &str) -> Status {
        evaluate_at(schedule, &self.current_local_time(timezone))
    }

    /// The first open day strictly after today, e.g. `"Monday at 9:00 AM"`.
    pub fn find_next_open_time(&self, schedule: &Schedule, timezone: &str) -> Option<String> {
        next_open_after(schedule, day_name(&self.current_local_time(timezone)))
    }
}

pub fn day_name(local: &NaiveDateTime) -> Day {
    Day::of(local)
}

/// Evaluates `schedule` at the civil time `now`.
pub fn evaluate_at(schedule: &Schedule, now: &NaiveDateTime) -> Status {
    match try_evaluate(schedule, now) {
        Ok(status) => {
            debug!("Evaluated hours at {}: {}", now, status.message);
            status
        }
        Err(err) => {
            warn!("Could not evaluate schedule at {}: {}", now, err);
            Status::unknown()
        }
    }
}

fn try_evaluate(schedule: &Schedule, now: &NaiveDateTime) -> Result<Status, ScheduleError> {
    let today = day_name(now);
    let timing = schedule.get(today);
    let bounds = match timing {
        Some(timing) => timing.interval(today.key())?,
        None => None,
    };

    let (Some(timing), Some((opening, closing))) = (timing, bounds) else {
        return Ok(Status::closed(
            "Closed today".to_string(),
            timing.cloned(),
            next_open_after(schedule, today),
        ));
    };

    let current = LocalTime::of(now);
    let open_at = opening.to_12_hour();
    let close_at = closing.to_12_hour();

    let status = if closing < opening {
        // Window wraps past midnight
        if current >= opening || current <= closing {
            Status::open(format!("Open until {} tomorrow", close_at), timing.clone())
        } else {
            Status::closed(format!("Opens at {}", open_at), Some(timing.clone()), None)
        }
    } else if current < opening {
        Status::closed(format!("Opens at {}", open_at), Some(timing.clone()), None)
    } else if current <= closing {
        Status::open(format!("Open until {}", close_at), timing.clone())
    } else {
        Status::closed(
            format!("Closed - was open until {}", close_at),
            Some(timing.clone()),
            next_open_after(schedule, today),
        )
    };
    Ok(status)
}

/// Scans the seven days after `today`, today itself last, for the first one
/// marked open.
pub fn next_open_after(schedule: &Schedule, today: Day) -> Option<String> {
    (1..=7).map(|offset| today.plus(offset)).find_map(|day| {
        let timing = schedule.get(day).filter(|timing| timing.open())?;
        let opening = timing.opening()?;
        Some(format!("{} at {}", day.label(), format_time(opening)))
    })
}

/// `HH:MM` to `h:mm AM/PM`. Anything that is not a zero-padded 24-hour time is
/// returned as given.
pub fn format_time(time: &str) -> String {
    match time.parse::<LocalTime>() {
        Ok(time) => time.to_12_hour(),
        Err(_) => time.to_string(),
    }
}

/// Structural check of a stored schedule before it is used for anything.
///
/// Must be an object; each day key present (and not `null`) must hold an
/// object with a boolean `isOpen`, and open days need non-empty `open` and
/// `close` strings. Other keys are ignored.
pub fn validate_schedule(candidate: &Value) -> bool {
    let Some(map) = candidate.as_object() else {
        return false;
    };
    Day::ALL.into_iter().all(|day| match map.get(day.key()) {
        None | Some(Value::Null) => true,
        Some(entry) => valid_entry(entry),
    })
}

fn valid_entry(entry: &Value) -> bool {
    let Some(entry) = entry.as_object() else {
        return false;
    };
    let non_empty = |key: &str| entry.get(key).and_then(Value::as_str).map_or(false, |s| !s.is_empty());
    match entry.get("isOpen").and_then(Value::as_bool) {
        Some(true) => non_empty("open") && non_empty("close"),
        Some(false) => true,
        None => false,
    }
}

/// Display rows for the whole week, Monday first regardless of how the
/// schedule was stored: `("Monday", "9:00 AM - 5:00 PM")` or `("Sunday", "Closed")`.
pub fn summarize_week(schedule: &Schedule) -> Vec<(&'static str, String)> {
    Day::ALL
        .into_iter()
        .map(|day| {
            let text = match schedule.get(day) {
                Some(timing) if timing.open() => format!(
                    "{} - {}",
                    format_time(timing.opening().unwrap_or_default()),
                    format_time(timing.closing().unwrap_or_default())
                ),
                _ => "Closed".to_string(),
            };
            (day.label(), text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{clock::FixedClock, daily::Daily};
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    // 2024-03-13 is a Wednesday
    fn wednesday_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 13)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn every_day(timing: Daily) -> Schedule {
        Day::ALL
            .into_iter()
            .fold(Schedule::new(), |schedule, day| schedule.with_day(day, timing.clone()))
    }

    #[test]
    fn same_day_window() {
        let schedule = every_day(Daily::new_open("09:00", "17:00"));

        let status = evaluate_at(&schedule, &wednesday_at(8, 0));
        assert!(!status.is_open);
        assert_eq!(status.message, "Opens at 9:00 AM");
        assert_eq!(status.next_open_description, None);

        let status = evaluate_at(&schedule, &wednesday_at(12, 0));
        assert!(status.is_open);
        assert_eq!(status.message, "Open until 5:00 PM");

        let status = evaluate_at(&schedule, &wednesday_at(18, 0));
        assert!(!status.is_open);
        assert_eq!(status.message, "Closed - was open until 5:00 PM");
        assert_eq!(status.next_open_description.as_deref(), Some("Thursday at 9:00 AM"));
    }

    #[test]
    fn same_day_bounds_are_inclusive() {
        let schedule = every_day(Daily::new_open("09:00", "17:00"));
        assert!(evaluate_at(&schedule, &wednesday_at(9, 0)).is_open);
        assert!(evaluate_at(&schedule, &wednesday_at(17, 0)).is_open);
        assert!(!evaluate_at(&schedule, &wednesday_at(17, 1)).is_open);
    }

    #[test]
    fn overnight_window() {
        let schedule = every_day(Daily::new_open("22:00", "02:00"));

        let status = evaluate_at(&schedule, &wednesday_at(23, 30));
        assert!(status.is_open);
        assert_eq!(status.message, "Open until 2:00 AM tomorrow");

        let status = evaluate_at(&schedule, &wednesday_at(1, 0));
        assert!(status.is_open);

        let status = evaluate_at(&schedule, &wednesday_at(3, 0));
        assert!(!status.is_open);
        assert_eq!(status.message, "Opens at 10:00 PM");
    }

    #[test]
    fn closed_today_points_at_next_open_day() {
        let schedule = Schedule::new()
            .with_day(Day::Wednesday, Daily::new_closed())
            .with_day(Day::Friday, Daily::new_open("10:00", "14:00"));
        let status = evaluate_at(&schedule, &wednesday_at(12, 0));
        assert!(!status.is_open);
        assert_eq!(status.message, "Closed today");
        assert_eq!(status.today_interval, Some(Daily::new_closed()));
        assert_eq!(status.next_open_description.as_deref(), Some("Friday at 10:00 AM"));
    }

    #[test]
    fn fully_closed_schedule() {
        let schedule = every_day(Daily::new_closed());
        let status = evaluate_at(&schedule, &wednesday_at(12, 0));
        assert!(!status.is_open);
        assert_eq!(status.message, "Closed today");
        assert_eq!(status.next_open_description, None);
        assert_eq!(next_open_after(&Schedule::new(), Day::Monday), None);
    }

    #[test]
    fn next_open_comes_back_round_to_today() {
        let schedule = Schedule::new().with_day(Day::Wednesday, Daily::new_open("09:00", "17:00"));
        assert_eq!(
            next_open_after(&schedule, Day::Wednesday).as_deref(),
            Some("Wednesday at 9:00 AM")
        );
        assert_eq!(
            next_open_after(&schedule, Day::Sunday).as_deref(),
            Some("Wednesday at 9:00 AM")
        );
    }

    #[test]
    fn malformed_entry_falls_back_to_open() {
        let schedule = every_day(Daily::new_open("9am", "17:00"));
        assert_eq!(evaluate_at(&schedule, &wednesday_at(12, 0)), Status::unknown());

        let timing: Daily = serde_json::from_value(json!({"isOpen": true, "open": "09:00"})).unwrap();
        let status = evaluate_at(&every_day(timing), &wednesday_at(12, 0));
        assert!(status.is_open);
        assert_eq!(status.message, "Unable to determine hours");
    }

    #[test]
    fn uses_the_location_zone() {
        // 2024-03-13 02:00 UTC is a Wednesday, but still Tuesday 22:00 in New York
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 13, 2, 0, 0).unwrap());
        let hours = BusinessHours::with_clock(clock);
        let schedule = Schedule::new()
            .with_day(Day::Tuesday, Daily::new_open("18:00", "23:00"))
            .with_day(Day::Wednesday, Daily::new_open("09:00", "10:00"))
            .with_day(Day::Thursday, Daily::new_open("08:00", "12:00"));

        let status = hours.is_open(&schedule, "America/New_York");
        assert!(status.is_open);
        assert_eq!(status.message, "Open until 11:00 PM");

        let status = hours.is_open(&schedule, "UTC");
        assert!(!status.is_open);
        assert_eq!(status.message, "Opens at 9:00 AM");

        assert_eq!(
            hours.find_next_open_time(&schedule, "America/New_York").as_deref(),
            Some("Wednesday at 9:00 AM")
        );
        assert_eq!(
            hours.find_next_open_time(&schedule, "UTC").as_deref(),
            Some("Thursday at 8:00 AM")
        );
    }

    #[test]
    fn format_time_passes_garbage_through() {
        assert_eq!(format_time("00:30"), "12:30 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("17:45"), "5:45 PM");
        for garbage in ["", "noon", "25:00", "7:00"] {
            assert_eq!(format_time(garbage), garbage);
            assert_eq!(format_time(&format_time(garbage)), garbage);
        }
    }

    #[test]
    fn validation() {
        assert!(validate_schedule(&json!({})));
        assert!(validate_schedule(&json!({
            "monday": {"isOpen": true, "open": "09:00", "close": "17:00"},
            "tuesday": {"isOpen": false},
            "notes": 42,
        })));
        assert!(!validate_schedule(&json!(null)));
        assert!(!validate_schedule(&json!("monday")));
        assert!(!validate_schedule(&json!({"monday": {"isOpen": true, "open": "09:00"}})));
        assert!(!validate_schedule(&json!({"monday": {"isOpen": true, "open": "09:00", "close": ""}})));
        assert!(!validate_schedule(&json!({"monday": {"isOpen": "true"}})));
        assert!(!validate_schedule(&json!({"monday": "09:00-17:00"})));
    }

    #[test]
    fn week_summary_is_monday_first() {
        let schedule = Schedule::new()
            .with_day(Day::Sunday, Daily::new_open("10:00", "16:00"))
            .with_day(Day::Monday, Daily::new_open("09:00", "17:00"))
            .with_day(Day::Tuesday, Daily::new_closed());
        let summary = summarize_week(&schedule);
        assert_eq!(summary.len(), 7);
        assert_eq!(summary[0], ("Monday", "9:00 AM - 5:00 PM".to_string()));
        assert_eq!(summary[1], ("Tuesday", "Closed".to_string()));
        assert_eq!(summary[2], ("Wednesday", "Closed".to_string()));
        assert_eq!(summary[6], ("Sunday", "10:00 AM - 4:00 PM".to_string()));
    }
}
