pub mod clock;
pub mod daily;
pub mod day;
pub mod error;
pub mod evaluator;
pub mod local_time;
pub mod schedule;
pub mod status;

pub use clock::{Clock, FixedClock, SystemClock};
pub use daily::Daily;
pub use day::Day;
pub use error::ScheduleError;
pub use evaluator::{
    day_name, evaluate_at, format_time, next_open_after, summarize_week, validate_schedule,
    BusinessHours,
};
pub use local_time::LocalTime;
pub use schedule::Schedule;
pub use status::Status;
