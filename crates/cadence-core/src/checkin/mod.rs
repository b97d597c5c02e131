mod eligibility;
mod frequency;
mod history;
mod period;
mod progress;

pub use eligibility::{
    checkin_status, is_checkin_allowed, is_period_completed, next_allowed_date, CheckinStatus,
    EligibilityConfig, EligibilityEvaluator, NEXT_ALLOWED_HORIZON_DAYS,
};
pub use frequency::{Frequency, UnknownFrequencyPolicy};
pub use history::{CheckinHistory, CheckinRecord};
pub use period::Period;
pub use progress::{expected_checkins, ProgressSummary};
