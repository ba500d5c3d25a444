//! `eventdesk`: terminal UI for a remote events collection.
//!
//! # Usage
//!
//! ```
//! eventdesk --url http://localhost:3000
//! eventdesk --config ~/.config/eventdesk/config.toml --log-file /tmp/ed.log
//! ```

mod app;
mod client;
mod ui;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::{App, Envelope};
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "https://rf-json-server.herokuapp.com";
const DEFAULT_COLLECTION: &str = "events";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "eventdesk", about = "Terminal UI for a remote events collection")]
struct Args {
  /// Path to a TOML config file (url, collection, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the record store.
  #[arg(long, env = "EVENTDESK_URL")]
  url: Option<String>,

  /// Collection path under the base URL (default: events).
  #[arg(long)]
  collection: Option<String>,

  /// Per-request timeout in seconds (default: 30).
  #[arg(long)]
  timeout_secs: Option<u64>,

  /// Where to write logs; the terminal belongs to the UI.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          Option<String>,
  #[serde(default)]
  collection:   Option<String>,
  #[serde(default)]
  timeout_secs: Option<u64>,
}

impl ConfigFile {
  fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// Flags (and their env fallbacks) override the file, which overrides
/// defaults.
fn resolve_config(args: &Args, file: ConfigFile) -> ApiConfig {
  let base_url = args
    .url
    .clone()
    .or(file.url)
    .filter(|u| !u.is_empty())
    .unwrap_or_else(|| DEFAULT_URL.to_string());
  let collection = args
    .collection
    .clone()
    .or(file.collection)
    .filter(|c| !c.is_empty())
    .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
  let timeout_secs = args
    .timeout_secs
    .or(file.timeout_secs)
    .unwrap_or(DEFAULT_TIMEOUT_SECS);

  ApiConfig {
    base_url,
    collection,
    timeout: Duration::from_secs(timeout_secs),
  }
}

fn init_logging(path: &Path) -> Result<()> {
  let file = File::create(path)
    .with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let log_path = args
    .log_file
    .clone()
    .unwrap_or_else(|| std::env::temp_dir().join("eventdesk.log"));
  init_logging(&log_path)?;

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };
  let api_config = resolve_config(&args, file_cfg);
  info!(
    url = %api_config.base_url,
    collection = %api_config.collection,
    "starting eventdesk"
  );

  let client = ApiClient::new(api_config).context("creating API client")?;
  let (tx, rx) = mpsc::unbounded_channel();
  let mut app = App::new(client, tx);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, rx).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  mut rx: UnboundedReceiver<Envelope>,
) -> Result<()> {
  app.open_list();

  loop {
    // Apply whatever the spawned requests have finished since last frame.
    while let Ok(envelope) = rx.try_recv() {
      app.apply(envelope);
    }

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      // Resizes redraw on the next iteration.
      _ => {}
    }
  }

  info!("exiting");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(argv: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("eventdesk").chain(argv.iter().copied())).unwrap()
  }

  #[test]
  fn defaults_apply_without_flags_or_file() {
    let cfg = resolve_config(&args(&[]), ConfigFile::default());
    // EVENTDESK_URL may be set in the environment running the tests.
    if std::env::var_os("EVENTDESK_URL").is_none() {
      assert_eq!(cfg.base_url, DEFAULT_URL);
    }
    assert_eq!(cfg.collection, "events");
    assert_eq!(cfg.timeout, Duration::from_secs(30));
  }

  #[test]
  fn file_overrides_defaults_and_flags_override_file() {
    let file: ConfigFile = toml::from_str(
      r#"
        url = "http://file.example"
        collection = "meetups"
        timeout_secs = 5
      "#,
    )
    .unwrap();
    let cfg = resolve_config(
      &args(&["--url", "http://flag.example", "--timeout-secs", "9"]),
      file,
    );
    assert_eq!(cfg.base_url, "http://flag.example");
    assert_eq!(cfg.collection, "meetups");
    assert_eq!(cfg.timeout, Duration::from_secs(9));
  }

  #[test]
  fn empty_values_fall_back() {
    let file: ConfigFile = toml::from_str(r#"url = """#).unwrap();
    let cfg = resolve_config(&args(&["--collection", ""]), file);
    assert_eq!(cfg.collection, "events");
  }
}
