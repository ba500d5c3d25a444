//! eventdesk development server.
//!
//! Reads `eventdesk.toml` (or the path given with `--config`) plus
//! `EVENTDESK_*` environment variables, seeds an in-memory store, and serves
//! the `/events` collection over HTTP. Nothing is persisted.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 3000
//! seed = "events.json"
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use eventdesk_core::memory::MemoryStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "eventdesk development server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "eventdesk.toml")]
  config: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
  host: String,
  port: u16,
  /// JSON array of records to start with.
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3000)?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("EVENTDESK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = match &server_cfg.seed {
    Some(path) => {
      let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
      MemoryStore::from_json(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))?
    }
    None => MemoryStore::new(),
  };
  tracing::info!(records = store.len().await, "store ready");

  let app = eventdesk_api::api_router(Arc::new(store));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
