use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Utc};

/// Current wall-clock time, used as the default "now" for balance seeding.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Midnight at the start of `instant`'s day.
pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// Midnight on the Monday of `instant`'s ISO week.
pub fn start_of_week(instant: NaiveDateTime) -> NaiveDateTime {
    let days_since_monday = i64::from(instant.weekday().num_days_from_monday());
    start_of_day(instant) - Duration::days(days_since_monday)
}

/// Midnight on the first day of `instant`'s month.
pub fn start_of_month(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_day(instant) - Duration::days(i64::from(instant.day0()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 15)
            .unwrap()
    }

    #[test]
    fn test_start_of_day() {
        let midnight = NaiveDate::from_ymd_opt(2009, 1, 18)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(start_of_day(at(2009, 1, 18, 23)), midnight);
    }

    #[test]
    fn test_start_of_week_is_monday() {
        // 2009-01-02 was a Friday
        let monday = NaiveDate::from_ymd_opt(2008, 12, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(start_of_week(at(2009, 1, 2, 12)), monday);
        assert_eq!(start_of_week(monday), monday);
    }

    #[test]
    fn test_start_of_month() {
        let first = NaiveDate::from_ymd_opt(2009, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(start_of_month(at(2009, 2, 28, 8)), first);
    }
}
