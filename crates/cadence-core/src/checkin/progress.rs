//! Challenge progress: how far along a span is and how many check-ins it
//! should hold by the end.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{CheckinHistory, Frequency};
use crate::dates::{days_between, week_start, ChallengeSpan, DateLike, DateWindow};
use crate::error::InvalidDateError;

/// Snapshot of a task's progress across its challenge span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub frequency: Frequency,
    pub total_days: i64,
    pub elapsed_days: i64,
    /// Recorded check-ins that fall inside the span
    pub checkins_in_span: usize,
    /// Check-ins needed to satisfy every period of the span
    pub expected_checkins: i64,
    /// `checkins_in_span / expected_checkins`, capped at 1.0
    pub completion_ratio: f64,
}

impl ProgressSummary {
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if `now` does not parse.
    pub fn compute<N: DateLike>(
        span: &ChallengeSpan,
        frequency: Frequency,
        history: &CheckinHistory,
        now: N,
    ) -> Result<Self, InvalidDateError> {
        let window = DateWindow {
            start: span.start.date(),
            end: span.end.date(),
        };
        let checkins_in_span = history.count_within(&window);
        let expected_checkins = expected_checkins(span, frequency);
        let completion_ratio = if expected_checkins > 0 {
            (checkins_in_span as f64 / expected_checkins as f64).min(1.0)
        } else {
            0.0
        };

        Ok(Self {
            frequency,
            total_days: span.total_days(),
            elapsed_days: span.elapsed_days(now)?,
            checkins_in_span,
            expected_checkins,
            completion_ratio,
        })
    }
}

/// Number of periods `frequency` carves out of `span`.
///
/// Partial weeks and months at either end count as whole periods.
pub fn expected_checkins(span: &ChallengeSpan, frequency: Frequency) -> i64 {
    let total = span.total_days();
    if total == 0 {
        return 0;
    }
    let (start, end) = (span.start.date(), span.end.date());

    match frequency {
        Frequency::Daily => total,
        Frequency::EveryOtherDay => (total + 1) / 2,
        Frequency::Weekly => days_between(week_start(start), week_start(end)) / 7 + 1,
        Frequency::Monthly => {
            let months = |d: chrono::NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
            months(end) - months(start) + 1
        }
    }
}
