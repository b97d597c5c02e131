pub mod check;
pub mod config;
pub mod date;
pub mod days;

/// Today's local calendar day. The CLI is the only place that reads the clock.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
