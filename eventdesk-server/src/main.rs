use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use eventdesk_core::memory::MemoryCollection;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventdesk-server")]
#[command(about = "Serve an in-memory events collection at /events")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = eventdesk_server::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("eventdesk-server listening on http://{}/events", addr);

    eventdesk_server::serve(listener, MemoryCollection::new()).await?;

    Ok(())
}
