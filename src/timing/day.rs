use chrono::{Datelike, NaiveDateTime, Weekday};

/// Day of the week, Monday first. Used as the index into a `Schedule`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Calendar order, the order `summarize_week` lists days in.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase key used in stored schedules.
    pub fn key(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// The day `offset` days after this one, wrapping through the week.
    pub fn plus(self, offset: usize) -> Self {
        Day::ALL[(self.index() + offset) % 7]
    }

    pub fn of(datetime: &NaiveDateTime) -> Self {
        datetime.weekday().into()
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn keys_and_labels() {
        let keys: Vec<&str> = Day::ALL.iter().map(|day| day.key()).collect();
        assert_eq!(
            keys,
            ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"]
        );
        assert_eq!(Day::Sunday.label(), "Sunday");
        assert_eq!(Day::Sunday.index(), 6);
    }

    #[test]
    fn plus_wraps() {
        assert_eq!(Day::Saturday.plus(1), Day::Sunday);
        assert_eq!(Day::Sunday.plus(1), Day::Monday);
        assert_eq!(Day::Wednesday.plus(7), Day::Wednesday);
    }

    #[test]
    fn weekday_of_date() {
        // 2024-03-15 was a Friday
        let datetime = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(Day::of(&datetime), Day::Friday);
    }
}
