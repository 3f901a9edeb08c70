use chrono::{Duration, NaiveDateTime};
use std::iter::FusedIterator;

use super::interval_model::{Interval, IntervalKind};

/// Ascending, contiguous sequence of intervals of one kind.
///
/// Cloning the iterator restarts from the clone's position; the range it
/// was built from is never consumed.
#[derive(Debug, Clone)]
pub struct IntervalIter {
    kind: IntervalKind,
    next: Option<Interval>,
    last_start: NaiveDateTime,
}

impl IntervalIter {
    pub(super) fn new(kind: IntervalKind, range: &Interval) -> Self {
        let first = kind.current_interval(range.start);
        let last_instant = (range.end - Duration::nanoseconds(1)).max(range.start);
        Self {
            kind,
            next: Some(first),
            last_start: kind.start_of(last_instant),
        }
    }
}

impl Iterator for IntervalIter {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        let current = self.next.take()?;
        if current.start < self.last_start {
            self.next = Some(self.kind.next(&current));
        }
        Some(current)
    }
}

impl FusedIterator for IntervalIter {}
