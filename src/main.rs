use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use pantheon_api::config::Config;
use pantheon_api::observability::{self, metrics};
use pantheon_api::server;
use pantheon_api::storage::{InMemoryStorage, Storage};

#[derive(Parser)]
#[command(name = "pantheon_api")]
#[command(about = "In-memory GraphQL API for pantheons and their gods")]
#[command(version = "0.1.0")]
struct Cli {
    /// Port to run the server on (overrides config file and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML config file (defaults to ./pantheon.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metrics server address, e.g. 127.0.0.1:9464
    #[arg(long)]
    metrics_addr: Option<String>,

    /// Start with empty collections instead of the seeded gods
    #[arg(long)]
    empty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    config.apply_overrides(std::env::var("PORT").ok(), cli.port, cli.metrics_addr.clone())?;

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = observability::init_logging(&config.logging);

    if let Some(addr) = config.metrics.addr.as_deref() {
        if let Err(e) = metrics::init(addr) {
            warn!("Failed to initialize metrics: {}", e);
        }
    }

    let storage: Arc<dyn Storage> = if cli.empty {
        info!("Using empty in-memory storage");
        Arc::new(InMemoryStorage::new())
    } else {
        info!("Using seeded in-memory storage (data will not persist)");
        Arc::new(InMemoryStorage::seeded())
    };

    let gods = storage.get_all_gods().await?.len();
    let pantheons = storage.get_all_pantheons().await?.len();
    metrics::store::collection_sizes(gods, pantheons);

    let addr = config.listen_addr()?;
    info!("Starting pantheon GraphQL API on {}", addr);

    server::start_server(storage, addr)
        .await
        .context("server failed")?;

    Ok(())
}
