//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use postwright_core::{Tool, ValidationError};
use postwright_genai::GenAiError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Invalid(#[from] ValidationError),

  /// The generation call for `0` failed. Only the tool's static message is
  /// sent to the client.
  #[error("{} failed", .0)]
  Generation(Tool),
}

impl ApiError {
  /// Log `source` and hide it behind the tool's failure message.
  pub fn generation(tool: Tool, source: GenAiError) -> Self {
    error!(%tool, error = %source, "generation failed");
    Self::Generation(tool)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, e.message.clone()),
      ApiError::Generation(tool) => {
        (StatusCode::BAD_GATEWAY, tool.failure_message().to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
