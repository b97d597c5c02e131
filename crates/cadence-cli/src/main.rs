use cadence_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cadence", version, about = "Cadence habit check-in CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check-in eligibility
    Check {
        #[command(subcommand)]
        action: commands::check::CheckAction,
    },
    /// Date normalization
    Date {
        #[command(subcommand)]
        action: commands::date::DateAction,
    },
    /// Challenge day counters
    Days {
        #[command(subcommand)]
        action: commands::days::DaysAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

// Set RUST_LOG=cadence_core=debug to see every verdict.
fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log.level))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&Config::load_or_default());

    let result = match cli.command {
        Commands::Check { action } => commands::check::run(action),
        Commands::Date { action } => commands::date::run(action),
        Commands::Days { action } => commands::days::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
