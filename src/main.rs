//! Star Bingo engine binary
//!
//! Wires the round engine and the HTTP API together from configuration.

use clap::Parser;
use starbingo::{ApiServer, HttpLedgerGateway, RoundEngine, StarBingoConfig};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "starbingo")]
#[command(about = "Star Bingo round engine and API server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// API server host override
    #[arg(long)]
    host: Option<String>,

    /// API server port override
    #[arg(long)]
    port: Option<u16>,

    /// Finance service base URL override
    #[arg(long)]
    ledger_url: Option<String>,

    /// Allowed CORS origins (comma-separated, use * for all)
    #[arg(long)]
    cors_origins: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starbingo=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("📂 Loading configuration from {}", path);
            StarBingoConfig::from_file(path)?
        }
        None => StarBingoConfig::default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ledger_url) = args.ledger_url {
        config.ledger.base_url = ledger_url;
    }
    if let Some(origins) = args.cors_origins {
        config.server.allowed_origins =
            origins.split(',').map(|s| s.trim().to_string()).collect();
    }
    config.validate()?;

    info!("🚀 Star Bingo engine starting");
    info!("   Ledger: {}", config.ledger.base_url);

    let ledger = Arc::new(HttpLedgerGateway::new(config.ledger.base_url.clone()));
    let engine = Arc::new(RoundEngine::new(config.game.clone(), ledger));

    // The tick loop runs for the life of the process; the server owns
    // shutdown.
    let engine_task = tokio::spawn(Arc::clone(&engine).run());

    let server = ApiServer::new(config.server.clone(), Arc::clone(&engine));
    let result = server.run().await;

    engine.stop();
    engine_task.abort();
    result
}
