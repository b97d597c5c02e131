//! Core error types for cadence-core.
//!
//! The eligibility engine has exactly one failure of its own,
//! [`InvalidDateError`]. Everything else here belongs to the configurable
//! evaluator and to the configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// A date-like input that does not normalize to a calendar day.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date: {}", .input.as_deref().unwrap_or("<missing>"))]
pub struct InvalidDateError {
    /// The offending input as received (`None` when a required date was missing).
    pub input: Option<String>,
}

impl InvalidDateError {
    /// Error for a value that was present but could not be parsed.
    pub fn unparseable(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
        }
    }

    /// Error for a required date that was not supplied at all.
    pub fn missing() -> Self {
        Self { input: None }
    }
}

/// A frequency string outside `{daily, every_other_day, weekly, monthly}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown frequency: '{0}'")]
pub struct UnknownFrequencyError(pub String);

/// Errors returned by [`crate::EligibilityEvaluator`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EligibilityError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    /// Only raised under [`crate::UnknownFrequencyPolicy::Reject`].
    #[error(transparent)]
    UnknownFrequency(#[from] UnknownFrequencyError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration directory could not be created
    #[error("Config directory {path} is unavailable: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Umbrella error for callers that mix evaluation, configuration and JSON
/// output.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Date error: {0}")]
    InvalidDate(#[from] InvalidDateError),

    #[error("Eligibility error: {0}")]
    Eligibility(#[from] EligibilityError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<UnknownFrequencyError> for CoreError {
    fn from(err: UnknownFrequencyError) -> Self {
        CoreError::Eligibility(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_date_message_names_the_input() {
        let err = InvalidDateError::unparseable("not-a-date");
        assert_eq!(err.to_string(), "Invalid date: not-a-date");
        assert_eq!(InvalidDateError::missing().to_string(), "Invalid date: <missing>");
        assert_eq!(InvalidDateError::missing().input, None);
    }

    #[test]
    fn eligibility_error_is_transparent() {
        let err: EligibilityError = UnknownFrequencyError("fortnightly".into()).into();
        assert_eq!(err.to_string(), "Unknown frequency: 'fortnightly'");
    }

    #[test]
    fn core_error_wraps_unknown_frequency() {
        let err: CoreError = UnknownFrequencyError("yearly".into()).into();
        assert!(matches!(
            err,
            CoreError::Eligibility(EligibilityError::UnknownFrequency(_))
        ));
    }

    #[test]
    fn core_error_keeps_the_inner_message() {
        let err: CoreError = InvalidDateError::unparseable("2024-13-01").into();
        assert_eq!(err.to_string(), "Date error: Invalid date: 2024-13-01");

        let err: CoreError = ConfigError::UnknownKey("log.nope".into()).into();
        assert_eq!(err.to_string(), "Configuration error: Unknown config key: log.nope");

        fn first_key(raw: &str) -> Result<String> {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            Ok(value.to_string())
        }
        assert!(matches!(first_key("{"), Err(CoreError::Json(_))));
    }
}
