//! postwright-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured content store, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use postwright_core::{ContentStore, Library, MemoryStore};
use postwright_genai::GeminiClient;
use postwright_server::{ServerConfig, StoreBackend, load_config};
use postwright_store_file::JsonFileStore;
use postwright_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Postwright content assistant server")]
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

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;

  let generator = GeminiClient::new(server_cfg.gemini.clone())
    .context("failed to build generation client")?;

  let backend = server_cfg.store.backend;
  let store_path = server_cfg.store.resolved_path();
  tracing::info!(%backend, path = %store_path.display(), "opening content store");

  match backend {
    StoreBackend::Sqlite => {
      if let Some(parent) = store_path.parent() {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {parent:?}"))?;
      }
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      serve(&server_cfg, store, generator).await
    }
    StoreBackend::File => {
      serve(&server_cfg, JsonFileStore::new(store_path), generator).await
    }
    StoreBackend::Memory => {
      tracing::warn!("memory store selected; records are lost on exit");
      serve(&server_cfg, MemoryStore::new(), generator).await
    }
  }
}

async fn serve<S>(
  cfg: &ServerConfig,
  store: S,
  generator: GeminiClient,
) -> anyhow::Result<()>
where
  S: ContentStore + 'static,
{
  let app = postwright_server::router(
    Library::new(Arc::new(store)),
    Arc::new(generator),
  );
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
