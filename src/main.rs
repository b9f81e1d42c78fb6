use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use garden_log::cli::{Cli, StoreKind};
use garden_log::logging::init_logging;
use garden_log::{MemoryStore, MongoStore, PlantStore, Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json_logs);

    let store: Arc<dyn PlantStore> = match cli.store {
        StoreKind::Mongo => Arc::new(
            MongoStore::connect(&cli.mongo_uri)
                .await
                .with_context(|| format!("Error connecting to MongoDB at {}", cli.mongo_uri))?,
        ),
        StoreKind::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let config = ServerConfig { addr: cli.addr() };
    Server::new(config, store)
        .run()
        .await
        .context("Server stopped with an error")?;

    Ok(())
}
