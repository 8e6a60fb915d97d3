//! quillt server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, serves the JSON API over HTTP, and keeps a live
//! overlap view for whoever is signed in.
//!
//! # Demo data
//!
//! ```
//! cargo run -p quillt-server -- --seed-demo
//! ```

mod demo;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use quillt_api::{AppState, CaptionConfig, Captioner, assist};
use quillt_core::store::TripStore;
use quillt_live::{Link, LiveSession, LiveState, restore_session};
use quillt_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Quillt travel overlap server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load demo identities and plans into an empty store and sign Diane in.
  #[arg(long)]
  seed_demo: bool,
}

/// Runtime configuration, from `config.toml` overlaid with `QUILLT_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
struct ServerConfig {
  host:           String,
  port:           u16,
  store_path:     PathBuf,
  /// Caption assist is disabled without a key.
  gemini_api_key: Option<String>,
  gemini_model:   Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "~/.local/share/quillt/quillt.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("QUILLT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open SQLite store.
  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if cli.seed_demo {
    demo::seed(&store).await.context("failed to seed demo data")?;
  }

  // Live view for the signed-in identity, if any.
  let live = match restore_session(&store, &store).await? {
    Some(viewer) => {
      let known = store.list_identities().await?;
      let live = LiveSession::start(store.subscribe(), viewer, known);
      tokio::spawn(log_view_changes(live.watch()));
      Some(live)
    }
    None => {
      info!("nobody is signed in, live view disabled");
      None
    }
  };

  let captions = Captioner::new(CaptionConfig {
    api_key:  server_cfg.gemini_api_key.clone(),
    model:    server_cfg
      .gemini_model
      .clone()
      .unwrap_or_else(|| assist::DEFAULT_MODEL.to_owned()),
    base_url: assist::DEFAULT_BASE_URL.to_owned(),
  })
  .context("failed to build caption client")?;

  let state = AppState {
    store:    Arc::new(store),
    captions: Arc::new(captions),
  };

  let app = Router::new()
    .nest("/api", quillt_api::api_router(state))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  if let Some(live) = live {
    live.shutdown().await;
  }
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!("shutting down");
}

/// Log the overlaps of every recomputed view until the session ends.
async fn log_view_changes(mut rx: watch::Receiver<LiveState>) {
  log_state(&rx.borrow_and_update().clone());
  while rx.changed().await.is_ok() {
    let state = rx.borrow_and_update().clone();
    log_state(&state);
  }
}

fn log_state(state: &LiveState) {
  if let Link::Disconnected { reason } = &state.link {
    warn!(%reason, "live view disconnected, showing last known overlaps");
    return;
  }
  let view = &state.view;
  info!(
    revision = state.revision,
    trips = view.trips_planned(),
    friends = view.friends.len(),
    overlaps = view.overlaps_found(),
    "view updated"
  );
  for o in &view.overlaps {
    info!(
      friend = %o.friend.display_name,
      city = %o.city,
      from = %o.overlap_start,
      to = %o.overlap_end,
      "overlap"
    );
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
