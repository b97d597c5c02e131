use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CheckinHistory, Frequency};
use crate::dates::{month_window, week_window, DateWindow};

/// The days around a target date that a frequency rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    /// `daily`: only the target itself
    Day { date: NaiveDate },
    /// `every_other_day`: the days on either side of the target
    Neighbors {
        before: Option<NaiveDate>,
        after: Option<NaiveDate>,
    },
    /// `weekly` / `monthly`: the whole week or month holding the target
    Window(DateWindow),
}

impl Period {
    pub fn containing(date: NaiveDate, frequency: Frequency) -> Self {
        match frequency {
            Frequency::Daily => Period::Day { date },
            Frequency::EveryOtherDay => Period::Neighbors {
                before: date.pred_opt(),
                after: date.succ_opt(),
            },
            Frequency::Weekly => Period::Window(week_window(date)),
            Frequency::Monthly => Period::Window(month_window(date)),
        }
    }

    /// Whether some recorded check-in already claims this period.
    pub fn is_claimed(&self, history: &CheckinHistory) -> bool {
        match self {
            Period::Day { date } => history.contains(*date),
            Period::Neighbors { before, after } => [before, after]
                .into_iter()
                .flatten()
                .any(|d| history.contains(*d)),
            Period::Window(window) => history.any_within(window),
        }
    }

    /// Only week and month windows carry a quota that can be "done".
    pub fn quota_window(&self) -> Option<&DateWindow> {
        match self {
            Period::Window(window) => Some(window),
            _ => None,
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
    fn neighbors_straddle_the_target() {
        let period = Period::containing(day("2024-03-01"), Frequency::EveryOtherDay);
        assert_eq!(
            period,
            Period::Neighbors {
                before: Some(day("2024-02-29")),
                after: Some(day("2024-03-02")),
            }
        );
    }

    #[test]
    fn neighbors_at_the_calendar_edge() {
        let period = Period::containing(NaiveDate::MIN, Frequency::EveryOtherDay);
        let history: CheckinHistory = [NaiveDate::MIN].into_iter().collect();
        assert!(matches!(period, Period::Neighbors { before: None, .. }));
        assert!(!period.is_claimed(&history));
    }

    #[test]
    fn windows_for_week_and_month() {
        let week = Period::containing(day("2024-03-08"), Frequency::Weekly);
        assert_eq!(
            week.quota_window(),
            Some(&DateWindow {
                start: day("2024-03-04"),
                end: day("2024-03-10"),
            })
        );

        let month = Period::containing(day("2024-02-10"), Frequency::Monthly);
        assert_eq!(month.quota_window().map(|w| w.end), Some(day("2024-02-29")));

        assert!(Period::containing(day("2024-02-10"), Frequency::Daily)
            .quota_window()
            .is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Period::containing(day("2024-03-08"), Frequency::Weekly))
            .unwrap();
        assert_eq!(json["kind"], "window");
        assert_eq!(json["start"], "2024-03-04");
    }
}
