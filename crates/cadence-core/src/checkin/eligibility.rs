//! Check-in eligibility rules.
//!
//! A check-in on `target` is admitted when:
//!
//! - `target` itself is not already in the history, for every frequency, and
//! - the [`Period`] the frequency draws around `target` holds no other
//!   check-in (neighbors for `every_other_day`, the Monday-Sunday week for
//!   `weekly`, the calendar month for `monthly`).
//!
//! Nothing here reads the clock or remembers a previous call. The verdict is
//! advisory: two devices can both be told "allowed" before either write
//! lands, so the store's uniqueness on (task, date) stays authoritative.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{CheckinHistory, Frequency, Period, UnknownFrequencyPolicy};
use crate::dates::{DateKey, DateLike};
use crate::error::{EligibilityError, InvalidDateError};

/// How far ahead [`next_allowed_date`] looks before giving up.
pub const NEXT_ALLOWED_HORIZON_DAYS: u64 = 400;

/// UI-facing state of a task on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinStatus {
    /// A check-in already exists on this exact day
    CheckedIn,
    /// A new check-in would be accepted
    Open,
    /// The week or month already has its check-in
    PeriodCompleted,
    /// Too close to a neighboring check-in
    Blocked,
}

impl CheckinStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, CheckinStatus::Open)
    }
}

// `None` is an unrecognized frequency that the caller chose to tolerate.
fn allowed_on(target: NaiveDate, frequency: Option<Frequency>, history: &CheckinHistory) -> bool {
    if history.contains(target) {
        return false;
    }
    match frequency {
        Some(frequency) => !Period::containing(target, frequency).is_claimed(history),
        None => true,
    }
}

fn completed_on(target: NaiveDate, frequency: Option<Frequency>, history: &CheckinHistory) -> bool {
    frequency
        .map(|f| Period::containing(target, f))
        .and_then(|period| period.quota_window().map(|w| history.any_within(w)))
        .unwrap_or(false)
}

fn status_on(
    target: NaiveDate,
    frequency: Option<Frequency>,
    history: &CheckinHistory,
) -> CheckinStatus {
    if history.contains(target) {
        CheckinStatus::CheckedIn
    } else if allowed_on(target, frequency, history) {
        CheckinStatus::Open
    } else if completed_on(target, frequency, history) {
        CheckinStatus::PeriodCompleted
    } else {
        CheckinStatus::Blocked
    }
}

fn next_allowed_on(
    from: NaiveDate,
    frequency: Option<Frequency>,
    history: &CheckinHistory,
) -> Option<NaiveDate> {
    (0..=NEXT_ALLOWED_HORIZON_DAYS)
        .map_while(|offset| from.checked_add_days(Days::new(offset)))
        .find(|candidate| allowed_on(*candidate, frequency, history))
}

fn normalize<D, I>(target: D, history: I) -> Result<(NaiveDate, CheckinHistory), InvalidDateError>
where
    D: DateLike,
    I: IntoIterator,
    I::Item: DateLike,
{
    let target = target.calendar_day()?;
    let history = CheckinHistory::from_dates(history)?;
    Ok((target, history))
}

/// Whether a new check-in on `target` is admitted under `frequency`.
///
/// # Errors
///
/// Returns [`InvalidDateError`] if `target` or any history entry does not
/// normalize to a calendar day.
pub fn is_checkin_allowed<D, I>(
    target: D,
    frequency: Frequency,
    history: I,
) -> Result<bool, InvalidDateError>
where
    D: DateLike,
    I: IntoIterator,
    I::Item: DateLike,
{
    let (target, history) = normalize(target, history)?;
    let allowed = allowed_on(target, Some(frequency), &history);
    tracing::debug!(%target, %frequency, allowed, "evaluated check-in");
    Ok(allowed)
}

/// Whether the week or month holding `target` already has a check-in.
///
/// Always `false` for `daily` and `every_other_day`: a rest day is not a
/// completed period.
///
/// # Errors
///
/// Returns [`InvalidDateError`] if `target` or any history entry does not
/// normalize to a calendar day.
pub fn is_period_completed<D, I>(
    target: D,
    frequency: Frequency,
    history: I,
) -> Result<bool, InvalidDateError>
where
    D: DateLike,
    I: IntoIterator,
    I::Item: DateLike,
{
    let (target, history) = normalize(target, history)?;
    Ok(completed_on(target, Some(frequency), &history))
}

/// Both verdicts folded into one state, so "done this week" and "too close
/// to a neighbor" stay distinguishable.
///
/// # Errors
///
/// Returns [`InvalidDateError`] if `target` or any history entry does not
/// normalize to a calendar day.
pub fn checkin_status<D, I>(
    target: D,
    frequency: Frequency,
    history: I,
) -> Result<CheckinStatus, InvalidDateError>
where
    D: DateLike,
    I: IntoIterator,
    I::Item: DateLike,
{
    let (target, history) = normalize(target, history)?;
    Ok(status_on(target, Some(frequency), &history))
}

/// Earliest day on or after `from` that would admit a check-in.
///
/// Returns `None` if nothing opens up within [`NEXT_ALLOWED_HORIZON_DAYS`].
///
/// # Errors
///
/// Returns [`InvalidDateError`] if `from` or any history entry does not
/// normalize to a calendar day.
pub fn next_allowed_date<D, I>(
    from: D,
    frequency: Frequency,
    history: I,
) -> Result<Option<DateKey>, InvalidDateError>
where
    D: DateLike,
    I: IntoIterator,
    I::Item: DateLike,
{
    let (from, history) = normalize(from, history)?;
    Ok(next_allowed_on(from, Some(frequency), &history).map(DateKey::from))
}

/// Configuration for the string-based evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    #[serde(default)]
    pub unknown_frequency: UnknownFrequencyPolicy,
}

/// Evaluator for callers that hold the frequency as raw text, e.g. straight
/// from a database column.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    config: EligibilityConfig,
}

impl EligibilityEvaluator {
    /// Create an evaluator that tolerates unknown frequencies.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    fn resolve(&self, frequency: &str) -> Result<Option<Frequency>, EligibilityError> {
        match frequency.parse::<Frequency>() {
            Ok(frequency) => Ok(Some(frequency)),
            Err(err) => match self.config.unknown_frequency {
                UnknownFrequencyPolicy::Permit => {
                    tracing::warn!(
                        frequency,
                        "unrecognized frequency, applying same-day rule only"
                    );
                    Ok(None)
                }
                UnknownFrequencyPolicy::Reject => Err(err.into()),
            },
        }
    }

    /// Dates are normalized before the frequency is looked at, so a bad date
    /// wins over a bad frequency.
    fn prepare<D, I>(
        &self,
        target: D,
        frequency: &str,
        history: I,
    ) -> Result<(NaiveDate, Option<Frequency>, CheckinHistory), EligibilityError>
    where
        D: DateLike,
        I: IntoIterator,
        I::Item: DateLike,
    {
        let (target, history) = normalize(target, history)?;
        let frequency = self.resolve(frequency)?;
        Ok((target, frequency, history))
    }

    /// See [`is_checkin_allowed`].
    ///
    /// # Errors
    ///
    /// [`EligibilityError::InvalidDate`] for unparseable dates;
    /// [`EligibilityError::UnknownFrequency`] only under
    /// [`UnknownFrequencyPolicy::Reject`].
    pub fn is_checkin_allowed<D, I>(
        &self,
        target: D,
        frequency: &str,
        history: I,
    ) -> Result<bool, EligibilityError>
    where
        D: DateLike,
        I: IntoIterator,
        I::Item: DateLike,
    {
        let (target, frequency, history) = self.prepare(target, frequency, history)?;
        let allowed = allowed_on(target, frequency, &history);
        tracing::debug!(%target, ?frequency, allowed, "evaluated check-in");
        Ok(allowed)
    }

    /// See [`is_period_completed`]. Unknown frequencies never complete a period.
    ///
    /// # Errors
    ///
    /// Same as [`EligibilityEvaluator::is_checkin_allowed`].
    pub fn is_period_completed<D, I>(
        &self,
        target: D,
        frequency: &str,
        history: I,
    ) -> Result<bool, EligibilityError>
    where
        D: DateLike,
        I: IntoIterator,
        I::Item: DateLike,
    {
        let (target, frequency, history) = self.prepare(target, frequency, history)?;
        Ok(completed_on(target, frequency, &history))
    }

    /// See [`checkin_status`].
    ///
    /// # Errors
    ///
    /// Same as [`EligibilityEvaluator::is_checkin_allowed`].
    pub fn checkin_status<D, I>(
        &self,
        target: D,
        frequency: &str,
        history: I,
    ) -> Result<CheckinStatus, EligibilityError>
    where
        D: DateLike,
        I: IntoIterator,
        I::Item: DateLike,
    {
        let (target, frequency, history) = self.prepare(target, frequency, history)?;
        Ok(status_on(target, frequency, &history))
    }

    /// See [`next_allowed_date`].
    ///
    /// # Errors
    ///
    /// Same as [`EligibilityEvaluator::is_checkin_allowed`].
    pub fn next_allowed_date<D, I>(
        &self,
        from: D,
        frequency: &str,
        history: I,
    ) -> Result<Option<DateKey>, EligibilityError>
    where
        D: DateLike,
        I: IntoIterator,
        I::Item: DateLike,
    {
        let (from, frequency, history) = self.prepare(from, frequency, history)?;
        Ok(next_allowed_on(from, frequency, &history).map(DateKey::from))
    }
}
