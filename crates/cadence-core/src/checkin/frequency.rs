use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownFrequencyError;

/// Declared cadence of a recurring task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Any day not already checked in
    Daily,
    /// At least one rest day between check-ins, in both directions
    EveryOtherDay,
    /// One check-in per Monday-to-Sunday week
    Weekly,
    /// One check-in per calendar month
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::EveryOtherDay,
        Frequency::Weekly,
        Frequency::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::EveryOtherDay => "every_other_day",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }

    /// Human-readable description of the rule
    pub fn description(&self) -> &'static str {
        match self {
            Frequency::Daily => "Every day",
            Frequency::EveryOtherDay => "Every other day",
            Frequency::Weekly => "Once a week",
            Frequency::Monthly => "Once a month",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = UnknownFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "every_other_day" => Ok(Frequency::EveryOtherDay),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(UnknownFrequencyError(s.to_string())),
        }
    }
}

/// What the string-based evaluator does with a frequency it doesn't know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFrequencyPolicy {
    /// Only the same-day rule applies
    #[default]
    Permit,
    /// Fail with [`UnknownFrequencyError`]
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for frequency in Frequency::ALL {
            assert_eq!(frequency.as_str().parse::<Frequency>().unwrap(), frequency);
        }
    }

    #[test]
    fn only_exact_snake_case_names_parse() {
        for raw in ["Weekly", "WEEKLY", "every-other-day", " monthly ", "Daily"] {
            let err = raw.parse::<Frequency>().unwrap_err();
            assert_eq!(err, UnknownFrequencyError(raw.to_string()));
        }
    }

    #[test]
    fn unknown_names_keep_the_raw_input() {
        let err = "fortnightly".parse::<Frequency>().unwrap_err();
        assert_eq!(err, UnknownFrequencyError("fortnightly".to_string()));
    }

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&Frequency::EveryOtherDay).unwrap(),
            "\"every_other_day\""
        );
        let policy: UnknownFrequencyPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(policy, UnknownFrequencyPolicy::Reject);
        assert_eq!(UnknownFrequencyPolicy::default(), UnknownFrequencyPolicy::Permit);
    }
}
