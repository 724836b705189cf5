mod app;
mod commands;
mod controller;
mod utils;
mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventdesk_core::memory::MemoryEventApi;
use eventdesk_core::{EventApi, EventId, EventStore, HttpEventApi};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(about = "Edit a remote list of events from the terminal")]
struct Cli {
    /// Base URL of the events service, e.g. http://localhost:3000
    #[arg(long, global = true)]
    url: Option<String>,

    /// Use a throwaway in-memory collection instead of a server
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive table editor (default)
    Shell,
    /// Print all events
    List,
    /// Create an event (blank unless fields are given)
    Add {
        #[arg(short, long, default_value = "")]
        name: String,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Replace an event's name and, optionally, its dates
    Update {
        id: String,

        #[arg(short, long)]
        name: String,

        /// Start date (YYYY-MM-DD, "" clears)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, "" clears)
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Delete an event
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if cli.offline {
        return run(cli.command, MemoryEventApi::default()).await;
    }

    let config = app::load_config(cli.url)?;
    let api = HttpEventApi::new(&config)?;
    run(cli.command, api).await
}

async fn run<A: EventApi>(command: Option<Commands>, api: A) -> Result<()> {
    match command.unwrap_or(Commands::Shell) {
        Commands::Shell => commands::shell::run(app::compose(api)).await,
        Commands::List => commands::list::run(EventStore::new(api)).await,
        Commands::Add { name, start, end } => {
            commands::add::run(EventStore::new(api), name, start, end).await
        }
        Commands::Update {
            id,
            name,
            start,
            end,
        } => commands::update::run(EventStore::new(api), EventId::from(id), name, start, end).await,
        Commands::Delete { id } => {
            commands::delete::run(EventStore::new(api), EventId::from(id)).await
        }
    }
}

/// Diagnostics go to stderr so they never mix with the table.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}
