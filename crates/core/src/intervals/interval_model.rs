use chrono::{Datelike, Days, Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::interval_iter::IntervalIter;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::{start_of_day, start_of_month, start_of_week};

/// A half-open span of wall-clock time, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Nominal length of one interval. Month-based periods are calendar
/// relative, so their duration varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days(u64),
    Months(u32),
}

impl Period {
    pub fn add_to(&self, instant: NaiveDateTime) -> NaiveDateTime {
        match *self {
            Period::Days(days) => instant + Days::new(days),
            Period::Months(months) => instant + Months::new(months),
        }
    }
}

/// Calendar bucket sizes used to group transactions over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalKind {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl IntervalKind {
    pub const ALL: [IntervalKind; 5] = [
        IntervalKind::Daily,
        IntervalKind::Weekly,
        IntervalKind::Monthly,
        IntervalKind::Quarterly,
        IntervalKind::Yearly,
    ];

    /// Start of the bucket containing `instant`.
    pub fn start_of(&self, instant: NaiveDateTime) -> NaiveDateTime {
        match self {
            IntervalKind::Daily => start_of_day(instant),
            IntervalKind::Weekly => start_of_week(instant),
            IntervalKind::Monthly => start_of_month(instant),
            IntervalKind::Quarterly => {
                start_of_month(instant) - Months::new(instant.month0() % 3)
            }
            IntervalKind::Yearly => start_of_month(instant) - Months::new(instant.month0()),
        }
    }

    pub fn period(&self) -> Period {
        match self {
            IntervalKind::Daily => Period::Days(1),
            IntervalKind::Weekly => Period::Days(7),
            IntervalKind::Monthly => Period::Months(1),
            IntervalKind::Quarterly => Period::Months(3),
            IntervalKind::Yearly => Period::Months(12),
        }
    }

    pub fn current_interval(&self, instant: NaiveDateTime) -> Interval {
        let start = self.start_of(instant);
        Interval::new(start, self.period().add_to(start))
    }

    /// The interval immediately following `interval`.
    pub fn next(&self, interval: &Interval) -> Interval {
        Interval::new(interval.end, self.period().add_to(interval.end))
    }

    /// Lazily walks every bucket touching `range`, from the one containing
    /// `range.start` through the one containing the last instant before
    /// `range.end`. An empty range yields the single bucket at its start.
    pub fn intervals_covering(&self, range: &Interval) -> IntervalIter {
        IntervalIter::new(*self, range)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Daily => "daily",
            IntervalKind::Weekly => "weekly",
            IntervalKind::Monthly => "monthly",
            IntervalKind::Quarterly => "quarterly",
            IntervalKind::Yearly => "yearly",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        IntervalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("unknown interval kind '{}'", s)).into()
            })
    }
}
