//! richlinker server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use richlinker_core::{AppConfig, CacheDb, MemoryStore, ScratchStore};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod clipboard;
mod handler;
mod notifier;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let store: Arc<dyn ScratchStore> = if config.ephemeral_store {
        tracing::info!("Using in-memory scratch store");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!(path = %config.db_path.display(), "Opening scratch store");
        Arc::new(CacheDb::open(&config.db_path).await?)
    };

    tracing::info!(ttl_ms = config.cycle_ttl_ms, "Starting richlinker server on stdio transport");

    let handler = handler::RichLinkServer::new(&config, store);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
