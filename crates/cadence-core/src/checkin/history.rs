//! Check-in records and the per-task history the rules evaluate against.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{DateKey, DateLike, DateWindow};
use crate::error::InvalidDateError;

/// One completed check-in: a task and the calendar day it was done on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub task_id: Uuid,
    pub date: DateKey,
}

impl CheckinRecord {
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if `date` does not normalize.
    pub fn new<D: DateLike>(task_id: Uuid, date: D) -> Result<Self, InvalidDateError> {
        Ok(Self {
            task_id,
            date: DateKey::parse(date)?,
        })
    }
}

/// The set of days a single task was checked in on.
///
/// Built fresh for every evaluation; repeated dates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinHistory {
    dates: BTreeSet<NaiveDate>,
}

impl CheckinHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize every entry of `dates`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] for the first entry that does not parse.
    pub fn from_dates<I>(dates: I) -> Result<Self, InvalidDateError>
    where
        I: IntoIterator,
        I::Item: DateLike,
    {
        let dates = dates
            .into_iter()
            .map(|d| d.calendar_day())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { dates })
    }

    /// History of one task out of a mixed list of records.
    pub fn for_task<'a, I>(records: I, task_id: Uuid) -> Self
    where
        I: IntoIterator<Item = &'a CheckinRecord>,
    {
        let dates = records
            .into_iter()
            .filter(|r| r.task_id == task_id)
            .map(|r| r.date.date())
            .collect();
        Self { dates }
    }

    /// Record a day. Returns `false` if it was already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Whether any recorded day lies inside `window`.
    pub fn any_within(&self, window: &DateWindow) -> bool {
        window.start <= window.end && self.dates.range(window.start..=window.end).next().is_some()
    }

    /// Number of recorded days inside `window`.
    pub fn count_within(&self, window: &DateWindow) -> usize {
        if window.start > window.end {
            return 0;
        }
        self.dates.range(window.start..=window.end).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl<'a> IntoIterator for &'a CheckinHistory {
    type Item = &'a NaiveDate;
    type IntoIter = std::collections::btree_set::Iter<'a, NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}

impl FromIterator<NaiveDate> for CheckinHistory {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn duplicate_days_collapse() {
        let history = CheckinHistory::from_dates([
            "2024-01-10",
            "2024-01-10T08:00:00Z",
            "2024-01-10T21:30:00-03:00",
        ])
        .unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.contains(day("2024-01-10")));
    }

    #[test]
    fn rejects_malformed_entries() {
        let err = CheckinHistory::from_dates(["2024-01-10", "nope"]).unwrap_err();
        assert_eq!(err.input.as_deref(), Some("nope"));
    }

    #[test]
    fn empty_history_is_valid() {
        let history = CheckinHistory::from_dates(Vec::<String>::new()).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn filters_records_by_task() {
        let run = Uuid::new_v4();
        let read = Uuid::new_v4();
        let records = vec![
            CheckinRecord::new(run, "2024-03-01").unwrap(),
            CheckinRecord::new(read, "2024-03-02").unwrap(),
            CheckinRecord::new(run, "2024-03-03").unwrap(),
            CheckinRecord::new(run, "2024-03-03").unwrap(),
        ];

        let history = CheckinHistory::for_task(&records, run);
        assert_eq!(history.len(), 2);
        assert!(!history.contains(day("2024-03-02")));
    }

    #[test]
    fn window_queries_are_inclusive() {
        let history: CheckinHistory = [day("2024-03-04"), day("2024-03-10"), day("2024-03-11")]
            .into_iter()
            .collect();
        let week = DateWindow {
            start: day("2024-03-04"),
            end: day("2024-03-10"),
        };
        assert!(history.any_within(&week));
        assert_eq!(history.count_within(&week), 2);

        let inverted = DateWindow {
            start: week.end,
            end: week.start,
        };
        assert!(!history.any_within(&inverted));
        assert_eq!(history.count_within(&inverted), 0);
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = CheckinRecord::new(Uuid::nil(), "2024-03-04T09:00:00+01:00").unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["date"], "2024-03-04");
    }
}
