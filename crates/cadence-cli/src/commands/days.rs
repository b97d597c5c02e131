use cadence_core::{elapsed_days, total_days, DateKey};
use clap::Subcommand;
use serde_json::json;

#[derive(Subcommand)]
pub enum DaysAction {
    /// Inclusive number of days in a challenge
    Total {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Days elapsed so far, clamped to the challenge length
    Elapsed {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Reference date (defaults to today)
        #[arg(long)]
        now: Option<String>,
    },
}

pub fn run(action: DaysAction) -> cadence_core::Result<()> {
    let output = match action {
        DaysAction::Total { start, end } => {
            let total = total_days(start.as_deref(), end.as_deref())?;
            json!({ "start": start, "end": end, "total_days": total })
        }
        DaysAction::Elapsed { start, end, now } => {
            let now = match now {
                Some(raw) => DateKey::parse(raw.as_str())?,
                None => DateKey::from(super::today()),
            };
            let total = total_days(start.as_deref(), end.as_deref())?;
            let elapsed = elapsed_days(start.as_deref(), end.as_deref(), now)?;
            json!({
                "start": start,
                "end": end,
                "now": now,
                "total_days": total,
                "elapsed_days": elapsed,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
