use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Source of the current instant. Swapped for `FixedClock` in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wall-clock date and time at `instant` in the IANA zone `timezone`.
///
/// An unknown zone falls back to the machine's local time instead of failing.
pub fn local_datetime_at(timezone: &str, instant: DateTime<Utc>) -> NaiveDateTime {
    match timezone.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).naive_local(),
        Err(err) => {
            warn!(
                "Unknown timezone '{}', using system local time: {}",
                timezone, err
            );
            instant.with_timezone(&Local).naive_local()
        }
    }
}
