//! Reqlens CLI - Inspect captured HTTP traffic from a terminal
//!
//! Usage:
//!   reqlens                     Open the interactive inspector
//!   reqlens view                Same as bare reqlens
//!   reqlens list [QUERY]        Print captured requests and exit
//!   reqlens curl <ID>           Print a replayable curl command for one request

mod api;
mod clipboard;
mod commands;
mod config;
mod tui;

use anyhow::Result;
use api::ApiClient;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reqlens")]
#[command(author = "Reqlens Team")]
#[command(version)]
#[command(about = "Inspect captured HTTP traffic from a terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Capture backend URL (overrides the config file)
    #[arg(short, long, global = true)]
    backend: Option<String>,

    /// How many requests to fetch per list refresh
    #[arg(short, long, global = true)]
    limit: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive inspector (default)
    View,

    /// Print captured requests and exit
    List {
        /// Optional free-text filter, same semantics as the TUI search
        query: Option<String>,
    },

    /// Print a replayable curl command for one captured request
    Curl {
        /// Request ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},reqlens_cli=info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    // Ensure config directories exist
    config::ensure_dirs()?;

    let config = Config::load()?;
    let backend = cli.backend.unwrap_or(config.backend_url);
    let limit = cli.limit.unwrap_or(config.limit);
    let client = ApiClient::new(&backend);

    match cli.command {
        None | Some(Commands::View) => {
            commands::view::run(client, limit).await?;
        }

        Some(Commands::List { query }) => {
            commands::list::run(&client, limit, query.as_deref()).await?;
        }

        Some(Commands::Curl { id }) => {
            commands::curl::run(&client, &id).await?;
        }
    }

    Ok(())
}
