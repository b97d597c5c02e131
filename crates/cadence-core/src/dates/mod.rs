//! Calendar-day normalization and period math.
//!
//! Every date that reaches the eligibility rules goes through [`DateLike`]
//! first, so the rules only ever compare plain calendar days. Timestamps keep
//! the day they were written in: `2024-01-10T23:30:00-05:00` is 2024-01-10,
//! never shifted into the host's timezone.

mod counters;

pub use counters::{elapsed_days, total_days, ChallengeSpan};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::InvalidDateError;

/// Canonical key format, `YYYY-MM-DD`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &[DATE_KEY_FORMAT, "%Y/%m/%d"];

/// Anything that can be pinned to a single calendar day.
pub trait DateLike {
    /// The calendar day this value falls on, in its own frame of reference.
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError>;
}

impl DateLike for str {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        parse_calendar_day(self)
    }
}

impl DateLike for String {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        parse_calendar_day(self)
    }
}

impl DateLike for NaiveDate {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        Ok(*self)
    }
}

impl DateLike for NaiveDateTime {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        Ok(self.date_naive())
    }
}

impl DateLike for DateKey {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        Ok(self.0)
    }
}

/// `None` is a required date that was never supplied.
impl<T: DateLike> DateLike for Option<T> {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        match self {
            Some(value) => value.calendar_day(),
            None => Err(InvalidDateError::missing()),
        }
    }
}

impl<T: DateLike + ?Sized> DateLike for &T {
    fn calendar_day(&self) -> Result<NaiveDate, InvalidDateError> {
        (**self).calendar_day()
    }
}

fn parse_calendar_day(raw: &str) -> Result<NaiveDate, InvalidDateError> {
    let input = raw.trim();

    if !input.is_empty() {
        if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
            return Ok(instant.date_naive());
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(naive.date());
            }
        }
        for format in NAIVE_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return Ok(date);
            }
        }
    }

    tracing::debug!(input = raw, "rejected unparseable date");
    Err(InvalidDateError::unparseable(raw))
}

/// A normalized calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Normalize any date-like value.
    pub fn parse<D: DateLike>(value: D) -> Result<Self, InvalidDateError> {
        value.calendar_day().map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateKey> for NaiveDate {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for DateKey {
    type Error = InvalidDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl FromStr for DateKey {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

/// Normalize a date-like value to its `YYYY-MM-DD` key.
///
/// # Errors
///
/// Returns [`InvalidDateError`] when the value is missing or does not parse.
/// Never falls back to "now" or to the epoch.
pub fn to_canonical_date_key<D: DateLike>(value: D) -> Result<String, InvalidDateError> {
    DateKey::parse(value).map(|key| key.to_string())
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN)
}

/// Monday through Sunday of the week containing `date`.
pub fn week_window(date: NaiveDate) -> DateWindow {
    let start = week_start(date);
    let end = start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    DateWindow { start, end }
}

/// First through last day of the month containing `date`.
pub fn month_window(date: NaiveDate) -> DateWindow {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    DateWindow { start, end }
}

/// Whole days from `start` to `end`; negative when `end` comes first.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}
