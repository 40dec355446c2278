//! Error type for `postwright-store-file`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed library file: {0}")]
  Json(#[from] serde_json::Error),

  #[error("library format version {found} is newer than {supported}")]
  UnsupportedVersion { found: u32, supported: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
