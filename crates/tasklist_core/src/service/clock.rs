//! Wall-clock abstraction and time-derived id sequencing.
//!
//! # Invariants
//! - `IdSequence::next` is strictly increasing for the sequence lifetime,
//!   even when the clock stalls or moves backwards.

use crate::model::task::{Task, TaskId};
use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current UTC time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant; used by tests and replay tooling.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<F: Fn() -> DateTime<Utc>> Clock for F {
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Formats a timestamp as ISO-8601 UTC with millisecond precision.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Monotonic id issuer seeded from wall-clock milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: i64,
}

impl IdSequence {
    /// Starts after the largest id already present in `tasks`.
    pub fn after(tasks: &[Task]) -> Self {
        Self {
            last: tasks.iter().map(|task| task.id.get()).max().unwrap_or(0),
        }
    }

    /// Issues `max(now_ms, last + 1)`.
    ///
    /// Returns `None` once `last` has reached `i64::MAX`; the sequence is
    /// exhausted and never hands out a used id.
    pub fn next(&mut self, now_ms: i64) -> Option<TaskId> {
        let id = now_ms.max(self.last.checked_add(1)?).max(1);
        self.last = id;
        Some(TaskId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::{iso_timestamp, IdSequence};
    use chrono::{TimeZone, Utc};

    #[test]
    fn iso_timestamp_uses_millis_and_z_suffix() {
        let at = Utc.timestamp_millis_opt(1_760_862_600_123).unwrap();
        assert_eq!(iso_timestamp(at), "2025-10-19T08:30:00.123Z");
    }

    #[test]
    fn ids_stay_increasing_when_clock_stalls_or_rewinds() {
        let mut ids = IdSequence::default();
        let first = ids.next(1_000).unwrap();
        let second = ids.next(1_000).unwrap();
        let third = ids.next(500).unwrap();
        assert!(first < second && second < third);
        assert_eq!(third.get(), 1_002);
    }

    #[test]
    fn exhausted_sequence_issues_nothing() {
        let mut ids = IdSequence::default();
        assert_eq!(ids.next(i64::MAX).unwrap().get(), i64::MAX);
        assert_eq!(ids.next(i64::MAX), None);
        assert_eq!(ids.next(0), None);
    }
}
