use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use expense_tracker::core::log::init_logging;
use expense_tracker::summary::DateRange;
use std::net::SocketAddr;

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
            Commands::Serve { listen } => expense_tracker::AppCommand::Serve { listen },
            Commands::Summary { from, to } => expense_tracker::AppCommand::Summary {
                range: DateRange {
                    start: from,
                    end: to,
                },
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the HTTP API
    Serve {
        /// Address to listen on, overrides the config file
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
    /// Display spending by category and month
    Summary {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

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
