//! Error type for `postwright-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("unknown content kind: {0:?}")]
  UnknownKind(String),

  #[error("unknown rating: {0:?}")]
  UnknownRating(String),

  /// The file was written by a newer schema than this build understands.
  #[error("unsupported schema version {found} (newest known is {supported})")]
  UnsupportedSchema { found: i64, supported: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
