//! Error type for `postwright-genai`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("generation service returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("generation service returned no text")]
  EmptyResponse,

  #[error("generation service returned no image")]
  NoImage,

  /// A structured plan did not have the required shape. Never partially used.
  #[error("invalid carousel plan: {0}")]
  InvalidPlan(String),

  #[error("invalid image data: {0}")]
  InvalidImage(String),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = GenAiError> = std::result::Result<T, E>;
