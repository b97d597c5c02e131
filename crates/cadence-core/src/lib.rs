//! # Cadence Core Library
//!
//! This library decides whether a recurring habit task may be checked in on a
//! given calendar day. The CLI binary is a thin layer over the same library;
//! check-in history is always supplied by the caller, and nothing here reads
//! the clock, touches storage (beyond the config file), or keeps state between
//! calls.
//!
//! ## Architecture
//!
//! - **Dates**: normalization of heterogeneous date inputs to calendar days,
//!   Monday-start weeks, calendar months, inclusive day counters
//! - **Check-in**: frequency rules, eligibility verdicts, period completion,
//!   progress summaries
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`is_checkin_allowed`]: admit/deny a check-in for a typed [`Frequency`]
//! - [`is_period_completed`]: whether the week/month already has its check-in
//! - [`EligibilityEvaluator`]: the same rules over raw frequency text, with a
//!   policy for unknown values
//! - [`to_canonical_date_key`], [`total_days`], [`elapsed_days`]: date helpers
//! - [`Config`]: Application configuration management

pub mod checkin;
pub mod dates;
pub mod error;
pub mod storage;

pub use checkin::{
    checkin_status, expected_checkins, is_checkin_allowed, is_period_completed, next_allowed_date,
    CheckinHistory, CheckinRecord, CheckinStatus, EligibilityConfig, EligibilityEvaluator,
    Frequency, Period, ProgressSummary, UnknownFrequencyPolicy,
};
pub use dates::{
    elapsed_days, month_window, to_canonical_date_key, total_days, week_start, week_window,
    ChallengeSpan, DateKey, DateLike, DateWindow,
};
pub use error::{
    ConfigError, CoreError, EligibilityError, InvalidDateError, Result, UnknownFrequencyError,
};
pub use storage::Config;
