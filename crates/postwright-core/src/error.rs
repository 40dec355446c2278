//! Error types for `postwright-core`.

use thiserror::Error;

use crate::tool::Tool;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store lock poisoned")]
  Poisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A tool input rejected before any generation call is made.
///
/// `message` is the user-facing text shown inline next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
  pub tool:    Tool,
  pub message: String,
}
