//! HTTP server wiring for Postwright: configuration and the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use postwright_core::{ContentStore, Library};
use postwright_genai::{GeminiConfig, Generator};
use serde::Deserialize;
use strum::Display;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `POSTWRIGHT_*` environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:   String,
  #[serde(default = "default_port")]
  pub port:   u16,
  #[serde(default)]
  pub store:  StoreConfig,
  pub gemini: GeminiConfig,
}

/// Where the content library lives.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
  #[serde(default)]
  pub backend: StoreBackend,
  /// Defaults to a per-backend file under `~/.local/share/postwright/`.
  pub path:    Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
  #[default]
  Sqlite,
  File,
  Memory,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }

impl StoreConfig {
  /// The configured path with `~` expanded, or the backend's default.
  pub fn resolved_path(&self) -> PathBuf {
    let path = match (&self.path, self.backend) {
      (Some(p), _) => p.clone(),
      (None, StoreBackend::File) => {
        PathBuf::from("~/.local/share/postwright/library.json")
      }
      (None, _) => PathBuf::from("~/.local/share/postwright/library.db"),
    };
    expand_tilde(&path)
  }
}

/// Load configuration from `path` (optional) overlaid with environment
/// variables such as `POSTWRIGHT_PORT` or `POSTWRIGHT_GEMINI__API_KEY`.
///
/// `GEMINI_API_KEY` is honoured as a fallback for the API key.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  let mut builder = config::Config::builder();
  if let Ok(key) = std::env::var("GEMINI_API_KEY") {
    builder = builder.set_default("gemini.api_key", key)?;
  }
  builder
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("POSTWRIGHT")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, with request tracing.
pub fn router<S, G>(library: Library<S>, generator: Arc<G>) -> Router
where
  S: ContentStore + 'static,
  G: Generator + 'static,
{
  Router::new()
    .nest("/api", postwright_api::api_router(library, generator))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use postwright_core::MemoryStore;
  use postwright_genai::GeminiClient;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn config_file_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
      &path,
      r#"
port = 9000

[store]
backend = "file"
path = "/var/lib/postwright/library.json"

[gemini]
api_key = "k"
text_model = "gemini-test"
"#,
    )
    .unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.store.backend, StoreBackend::File);
    assert_eq!(
      cfg.store.resolved_path(),
      PathBuf::from("/var/lib/postwright/library.json")
    );
    assert_eq!(cfg.gemini.text_model, "gemini-test");
    assert_eq!(cfg.gemini.image_model, "imagen-4.0-generate-001");
  }

  #[test]
  fn default_store_is_sqlite_under_home() {
    let store = StoreConfig::default();
    assert_eq!(store.backend, StoreBackend::Sqlite);
    let path = store.resolved_path();
    assert!(path.ends_with(".local/share/postwright/library.db"));
  }

  #[test]
  fn unknown_backend_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
      &path,
      "[store]\nbackend = \"redis\"\n[gemini]\napi_key = \"k\"\n",
    )
    .unwrap();
    assert!(load_config(&path).is_err());
  }

  #[test]
  fn tilde_expansion() {
    let plain = Path::new("/tmp/x.db");
    assert_eq!(expand_tilde(plain), plain);
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    }
  }

  #[tokio::test]
  async fn api_is_nested() {
    let library = Library::new(Arc::new(MemoryStore::new()));
    let gemini = GeminiClient::new(GeminiConfig::new("unused")).unwrap();
    let app = router(library, Arc::new(gemini));

    let resp = app
      .clone()
      .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");

    let resp = app
      .oneshot(Request::get("/api/records").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
