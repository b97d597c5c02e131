use cadence_core::{Config, EligibilityEvaluator};
use clap::{Args, Subcommand};
use serde_json::json;

#[derive(Args)]
pub struct RuleArgs {
    /// Frequency (daily, every_other_day, weekly, monthly)
    #[arg(long, short)]
    frequency: String,
    /// Dates already checked in (repeat or comma-separate)
    #[arg(long = "history", value_delimiter = ',')]
    history: Vec<String>,
}

#[derive(Subcommand)]
pub enum CheckAction {
    /// Whether a new check-in on DATE is allowed
    Allowed {
        /// Target date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// Whether the week/month holding DATE already has its check-in
    Period {
        /// Target date
        #[arg(long)]
        date: String,
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// Combined status for DATE (checked_in, open, period_completed, blocked)
    Status {
        /// Target date
        #[arg(long)]
        date: String,
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// Earliest date on or after FROM that allows a check-in
    Next {
        /// First date to consider
        #[arg(long)]
        from: String,
        #[command(flatten)]
        rule: RuleArgs,
    },
}

pub fn run(action: CheckAction) -> cadence_core::Result<()> {
    let config = Config::load()?;
    tracing::debug!(policy = ?config.eligibility.unknown_frequency, "loaded eligibility config");
    let evaluator = EligibilityEvaluator::with_config(config.eligibility);

    let output = match action {
        CheckAction::Allowed { date, rule } => {
            let allowed = evaluator.is_checkin_allowed(&date, &rule.frequency, &rule.history)?;
            json!({ "date": date, "frequency": rule.frequency, "allowed": allowed })
        }
        CheckAction::Period { date, rule } => {
            let completed = evaluator.is_period_completed(&date, &rule.frequency, &rule.history)?;
            json!({ "date": date, "frequency": rule.frequency, "period_completed": completed })
        }
        CheckAction::Status { date, rule } => {
            let status = evaluator.checkin_status(&date, &rule.frequency, &rule.history)?;
            json!({ "date": date, "frequency": rule.frequency, "status": status })
        }
        CheckAction::Next { from, rule } => {
            let next = evaluator.next_allowed_date(&from, &rule.frequency, &rule.history)?;
            json!({ "from": from, "frequency": rule.frequency, "next_allowed": next })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
