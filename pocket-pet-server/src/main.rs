//! Pocket Pet API server binary.

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Serve the pocket-pet API.
#[derive(Parser, Debug)]
#[command(name = "pocket-pet-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind.
    #[arg(long = "host", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short = 'p', long = "port", default_value = "8000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "pocket-pet server listening");
    pocket_pet_server::run(listener).await?;
    Ok(())
}
