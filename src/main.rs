use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use expense_tracker::core::log::init_logging;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for expense_tracker::AppCommand {
    fn from(cmd: Commands) -> expense_tracker::AppCommand {
        match cmd {
            Commands::Serve => expense_tracker::AppCommand::Serve,
            Commands::Rates => expense_tracker::AppCommand::Rates,
            Commands::Convert { amount, from, to } => {
                expense_tracker::AppCommand::Convert { amount, from, to }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the HTTP API
    Serve,
    /// Display current exchange rates
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: f64,
        /// Currency code of the amount, e.g. USD
        from: String,
        /// Currency code to convert into, e.g. EUR
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The server reports its lifecycle and requests, the other commands stay quiet
    let default_level = match cli.command {
        Some(Commands::Serve) => LevelFilter::INFO,
        _ => LevelFilter::OFF,
    };
    init_logging(cli.verbose, default_level);

    let result = match cli.command {
        Some(Commands::Setup) => expense_tracker::cli::setup::setup(),
        Some(cmd) => expense_tracker::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
