//! Handlers for `/records` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/records` | Optional `?kind=all\|strategy\|post`; newest first |
//! | `POST`   | `/records` | Body: `{"kind":"post","prompt":"..","content":".."}` |
//! | `PATCH`  | `/records/:id` | Body: any of `prompt`, `content`, `rating` |
//! | `PUT`    | `/records/:id/rating` | Body: `{"rating":"good"\|"bad"\|null}` |
//! | `DELETE` | `/records/:id` | 404 if not found |
//!
//! Persistence failures are masked by the [`Library`](postwright_core::Library):
//! a failed write reads as "not found", a failed read as an empty list.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use postwright_core::{
  ContentRecord, ContentStore, KindFilter, NewRecord, Rating, RecordPatch,
};
use postwright_genai::Generator;
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub kind: KindFilter,
}

/// `GET /records[?kind=<filter>]`
pub async fn list<S, G>(
  State(state): State<ApiState<S, G>>,
  Query(params): Query<ListParams>,
) -> Json<Vec<ContentRecord>>
where
  S: ContentStore,
  G: Generator,
{
  Json(state.library.browse(params.kind).await)
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /records`: the id and creation time are assigned here.
pub async fn create<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<NewRecord>,
) -> impl IntoResponse
where
  S: ContentStore,
  G: Generator,
{
  let record = state
    .library
    .save(body.kind, body.prompt, body.content)
    .await;
  (StatusCode::CREATED, Json(record))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /records/:id`
pub async fn update<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(id): Path<String>,
  Json(patch): Json<RecordPatch>,
) -> Result<StatusCode, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  if !state.library.update(&id, patch).await {
    return Err(not_found(&id));
  }
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct RatingBody {
  pub rating: Option<Rating>,
}

/// `PUT /records/:id/rating`: `null` clears the rating.
pub async fn rate<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(id): Path<String>,
  Json(body): Json<RatingBody>,
) -> Result<StatusCode, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  if !state.library.rate(&id, body.rating).await {
    return Err(not_found(&id));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /records/:id`
pub async fn delete<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  if !state.library.delete(&id).await {
    return Err(not_found(&id));
  }
  Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: &str) -> ApiError {
  ApiError::NotFound(format!("record {id} not found"))
}
