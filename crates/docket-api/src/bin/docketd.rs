//! `docketd` — the Docket assessment-calendar server.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the JSON
//! document store and the rubric image directory, and serves the JSON API
//! over HTTP. Every setting has a working default; a bare `docketd` starts
//! a usable classroom instance with the documented teacher code.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use docket_api::{AppState, ServerConfig};
use docket_core::role::RoleGate;
use docket_store_json::{DocumentStore, FileBlobStore, JsonSnapshot};
use docket_suggest::SuggestClient;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Docket assessment calendar server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  // Load configuration: file first, then DOCKET_* environment overrides
  // (double underscore for nesting, e.g. DOCKET_SUGGEST__API_KEY).
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("DOCKET").separator("__"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // The suggestion credential can also come in via the conventional
  // variable name.
  if server_cfg.suggest.api_key.is_none()
    && let Ok(key) = std::env::var("OPENAI_API_KEY")
  {
    server_cfg.suggest.api_key = Some(key);
  }

  let data_file = expand_tilde(&server_cfg.data_file);
  let image_dir = expand_tilde(&server_cfg.image_dir);

  // Open the document store.
  let store = DocumentStore::open(
    JsonSnapshot::new(&data_file),
    server_cfg.normalization,
  )
  .await
  .with_context(|| format!("failed to open store at {data_file:?}"))?;

  let suggest = SuggestClient::new(server_cfg.suggest.clone())
    .context("failed to build suggestion client")?;
  if !suggest.is_configured() {
    tracing::info!(
      "no suggestion credential configured; topic suggestions disabled"
    );
  }

  // Build application state.
  let state = AppState {
    store:         Arc::new(store),
    blobs:         Arc::new(FileBlobStore::new(image_dir)),
    gate:          Arc::new(RoleGate::new(server_cfg.teacher_code.clone())),
    suggest:       Arc::new(suggest),
    normalization: server_cfg.normalization,
  };

  let app = docket_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
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
