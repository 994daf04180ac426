mod commands;
mod render;
mod utils;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daymark_core::DayMarker;
use daymark_core::config::DaymarkConfig;
use daymark_core::host::ProviderHost;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daymark")]
#[command(about = "See which of the next 30 days have events, and add placeholder events")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the next 30 days with event days marked
    Show {
        /// Print the markings as JSON instead of a calendar
        #[arg(long)]
        json: bool,
    },
    /// Create a placeholder event on a day
    New {
        /// Day to create the event on (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Pick days interactively and create events on them
    Pick,
    /// List the host's calendars and what you may do with them
    Calendars,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = DaymarkConfig::load().context("Failed to load daymark config")?;
    let host = ProviderHost::from_config(&config);
    let session = DayMarker::new(host).prevent_duplicates(config.prevent_duplicates);

    match cli.command {
        Commands::Show { json } => commands::show::run(session, json).await,
        Commands::New { date } => commands::new::run(session, date).await,
        Commands::Pick => commands::pick::run(session).await,
        Commands::Calendars => commands::calendars::run(session).await,
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid RUST_LOG filter")?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
