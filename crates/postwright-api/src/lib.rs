//! JSON REST API for Postwright.
//!
//! Exposes an axum [`Router`] backed by a [`Library`] over any
//! [`ContentStore`] and any [`Generator`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", postwright_api::api_router(library, generator))
//! ```

pub mod error;
pub mod records;
pub mod tools;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, patch, post, put},
};
use postwright_core::{ContentStore, Library};
use postwright_genai::Generator;
use serde_json::{Value, json};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S, G> {
  pub library:   Library<S>,
  pub generator: Arc<G>,
}

impl<S, G> Clone for ApiState<S, G> {
  fn clone(&self) -> Self {
    Self {
      library:   self.library.clone(),
      generator: Arc::clone(&self.generator),
    }
  }
}

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(library: Library<S>, generator: Arc<G>) -> Router<()>
where
  S: ContentStore + 'static,
  G: Generator + 'static,
{
  Router::new()
    .route("/health", get(health))
    // Records
    .route(
      "/records",
      get(records::list::<S, G>).post(records::create::<S, G>),
    )
    .route(
      "/records/{id}",
      patch(records::update::<S, G>).delete(records::delete::<S, G>),
    )
    .route("/records/{id}/rating", put(records::rate::<S, G>))
    // Tools
    .route("/tools/strategy", post(tools::strategy::<S, G>))
    .route("/tools/post", post(tools::post::<S, G>))
    .route("/tools/carousel", post(tools::carousel::<S, G>))
    .route("/tools/carousel/image", post(tools::slide_image::<S, G>))
    .route("/tools/posting-times", post(tools::posting_times::<S, G>))
    .route("/tools/profile", post(tools::profile::<S, G>))
    .route("/tools/profile/image", post(tools::enhance_image::<S, G>))
    .route("/tools/banner", post(tools::banner::<S, G>))
    .with_state(ApiState { library, generator })
}

/// `GET /health`
async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

#[cfg(test)]
mod tests;
