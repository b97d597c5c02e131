//! Inclusive day counters for challenge progress.
//!
//! Both counters work on normalized calendar days and share
//! [`days_between`](super::days_between) with the period rules, so "day 5 of
//! 10" and "which week is this" can never disagree by one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{days_between, DateKey, DateLike};
use crate::error::InvalidDateError;

fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (days_between(start, end) + 1).max(0)
}

fn boundary<D: DateLike>(value: Option<D>) -> Result<Option<NaiveDate>, InvalidDateError> {
    value.map(|v| v.calendar_day()).transpose()
}

/// Inclusive number of days from `start` to `end`.
///
/// Returns `0` when either boundary is missing. An inverted range (`end`
/// before `start`) also returns `0` rather than a negative count, which
/// keeps [`elapsed_days`] inside `[0, total_days]`.
///
/// # Errors
///
/// Returns [`InvalidDateError`] when a supplied boundary does not parse.
pub fn total_days<D: DateLike>(start: Option<D>, end: Option<D>) -> Result<i64, InvalidDateError> {
    match (boundary(start)?, boundary(end)?) {
        (Some(start), Some(end)) => Ok(inclusive_days(start, end)),
        _ => Ok(0),
    }
}

/// Inclusive number of days from `start` to `now`, clamped to `[0, total_days]`.
///
/// # Errors
///
/// Returns [`InvalidDateError`] when a supplied boundary or `now` does not parse.
pub fn elapsed_days<D: DateLike, N: DateLike>(
    start: Option<D>,
    end: Option<D>,
    now: N,
) -> Result<i64, InvalidDateError> {
    let (start, end) = match (boundary(start)?, boundary(end)?) {
        (Some(start), Some(end)) => (start, end),
        _ => return Ok(0),
    };
    let now = now.calendar_day()?;
    Ok(clamped_elapsed(start, end, now))
}

fn clamped_elapsed(start: NaiveDate, end: NaiveDate, now: NaiveDate) -> i64 {
    if now < start {
        0
    } else if now > end {
        inclusive_days(start, end)
    } else {
        inclusive_days(start, now)
    }
}

/// The date range a challenge runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeSpan {
    pub start: DateKey,
    pub end: DateKey,
}

impl ChallengeSpan {
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if either boundary does not parse.
    pub fn new<S: DateLike, E: DateLike>(start: S, end: E) -> Result<Self, InvalidDateError> {
        Ok(Self {
            start: DateKey::parse(start)?,
            end: DateKey::parse(end)?,
        })
    }

    pub fn total_days(&self) -> i64 {
        inclusive_days(self.start.date(), self.end.date())
    }

    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if `now` does not parse.
    pub fn elapsed_days<N: DateLike>(&self, now: N) -> Result<i64, InvalidDateError> {
        let now = now.calendar_day()?;
        Ok(clamped_elapsed(self.start.date(), self.end.date(), now))
    }

    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if `now` does not parse.
    pub fn remaining_days<N: DateLike>(&self, now: N) -> Result<i64, InvalidDateError> {
        Ok(self.total_days() - self.elapsed_days(now)?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Option<&str> = Some("2024-01-01");
    const END: Option<&str> = Some("2024-01-10");

    #[test]
    fn total_days_is_inclusive() {
        assert_eq!(total_days(START, END).unwrap(), 10);
        assert_eq!(total_days(START, START).unwrap(), 1);
        assert_eq!(total_days(Some("2024-02-01"), Some("2024-02-29")).unwrap(), 29);
    }

    #[test]
    fn total_days_is_zero_without_both_boundaries() {
        assert_eq!(total_days(None, END).unwrap(), 0);
        assert_eq!(total_days(START, None).unwrap(), 0);
        assert_eq!(total_days::<&str>(None, None).unwrap(), 0);
    }

    #[test]
    fn total_days_is_zero_for_inverted_range() {
        assert_eq!(total_days(END, START).unwrap(), 0);
    }

    #[test]
    fn total_days_ignores_time_of_day() {
        let total = total_days(
            Some("2024-01-01T23:59:00+00:00"),
            Some("2024-01-10T00:01:00+00:00"),
        )
        .unwrap();
        assert_eq!(total, 10);
    }

    #[test]
    fn elapsed_days_clamps_to_range() {
        assert_eq!(elapsed_days(START, END, "2023-12-31").unwrap(), 0);
        assert_eq!(elapsed_days(START, END, "2024-01-15").unwrap(), 10);
        assert_eq!(elapsed_days(START, END, "2024-01-05").unwrap(), 5);
        assert_eq!(elapsed_days(START, END, "2024-01-01").unwrap(), 1);
        assert_eq!(elapsed_days(START, END, "2024-01-10").unwrap(), 10);
    }

    #[test]
    fn elapsed_days_is_zero_without_both_boundaries() {
        assert_eq!(elapsed_days(None, END, "2024-01-05").unwrap(), 0);
    }

    #[test]
    fn malformed_boundaries_fail() {
        assert!(total_days(Some("garbage"), END).is_err());
        assert!(elapsed_days(START, END, "yesterday").is_err());
    }

    #[test]
    fn challenge_span_counters() {
        let span = ChallengeSpan::new("2024-01-01", "2024-01-10").unwrap();
        assert_eq!(span.total_days(), 10);
        assert_eq!(span.elapsed_days("2024-01-04").unwrap(), 4);
        assert_eq!(span.remaining_days("2024-01-04").unwrap(), 6);
        assert_eq!(span.remaining_days("2024-02-01").unwrap(), 0);
        assert!(span.contains(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
        assert!(!span.contains(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()));
    }
}
