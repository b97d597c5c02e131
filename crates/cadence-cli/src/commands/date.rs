use cadence_core::to_canonical_date_key;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum DateAction {
    /// Print the canonical YYYY-MM-DD key for a date or timestamp
    Normalize {
        /// Date-like value, e.g. "2024-03-04T21:00:00-05:00"
        value: String,
    },
}

pub fn run(action: DateAction) -> cadence_core::Result<()> {
    match action {
        DateAction::Normalize { value } => {
            println!("{}", to_canonical_date_key(&value)?);
        }
    }
    Ok(())
}
