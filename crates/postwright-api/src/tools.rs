//! Handlers for `/tools` endpoints.
//!
//! Each handler validates its input with the tool's rules before calling the
//! generator; a rejected input is a 400 and the generator is never reached.
//! A failed generation is a 502 carrying only the tool's static message.

use axum::{Json, extract::State};
use postwright_core::{ContentStore, PostStyle, Tool};
use postwright_genai::{CarouselSlide, GeneratedImage, Generator, prompts};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct TextResponse {
  pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
  /// `data:<mime>;base64,<data>`
  pub image: String,
}

impl From<GeneratedImage> for ImageResponse {
  fn from(image: GeneratedImage) -> Self { Self { image: image.to_data_url() } }
}

async fn text<S, G>(
  state: &ApiState<S, G>,
  tool: Tool,
  prompt: String,
) -> Result<Json<TextResponse>, ApiError>
where
  G: Generator,
{
  debug!(%tool, "generating text");
  let text = state
    .generator
    .generate_text(&prompt)
    .await
    .map_err(|e| ApiError::generation(tool, e))?;
  Ok(Json(TextResponse { text }))
}

// ─── Strategy ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StrategyBody {
  pub topic: String,
}

/// `POST /tools/strategy`
pub async fn strategy<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<StrategyBody>,
) -> Result<Json<TextResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::ContentStrategy;
  let topic = tool.validate(&body.topic)?;
  text(&state, tool, prompts::content_strategy(topic)).await
}

// ─── Post ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostBody {
  pub idea:  String,
  #[serde(default)]
  pub style: PostStyle,
}

/// `POST /tools/post`
pub async fn post<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<PostBody>,
) -> Result<Json<TextResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::PostWriter;
  let idea = tool.validate(&body.idea)?;
  text(&state, tool, prompts::post(idea, body.style)).await
}

// ─── Carousel ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CarouselBody {
  pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct CarouselResponse {
  pub slides: Vec<CarouselSlide>,
}

/// `POST /tools/carousel`
pub async fn carousel<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<CarouselBody>,
) -> Result<Json<CarouselResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::CarouselCreator;
  let topic = tool.validate(&body.topic)?;
  let slides = state
    .generator
    .generate_carousel_plan(topic)
    .await
    .map_err(|e| ApiError::generation(tool, e))?;
  Ok(Json(CarouselResponse { slides }))
}

#[derive(Debug, Deserialize)]
pub struct SlideImageBody {
  #[serde(alias = "visualSuggestion")]
  pub visual_suggestion: String,
}

/// `POST /tools/carousel/image`
pub async fn slide_image<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<SlideImageBody>,
) -> Result<Json<ImageResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::SlideImage;
  let suggestion = tool.validate(&body.visual_suggestion)?;
  let image = state
    .generator
    .generate_slide_image(suggestion)
    .await
    .map_err(|e| ApiError::generation(tool, e))?;
  Ok(Json(image.into()))
}

// ─── Posting times ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostingTimesBody {
  pub industry:        String,
  pub target_timezone: String,
  pub local_timezone:  String,
}

/// `POST /tools/posting-times`
pub async fn posting_times<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<PostingTimesBody>,
) -> Result<Json<TextResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::PostTimeFinder;
  let industry = tool.validate(&body.industry)?;
  let target = body.target_timezone.trim();
  let local = body.local_timezone.trim();
  if target.is_empty() || local.is_empty() {
    return Err(ApiError::BadRequest(
      "Both a target and a local timezone are required.".into(),
    ));
  }
  text(&state, tool, prompts::posting_times(industry, target, local)).await
}

// ─── Profile ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
  pub bio: String,
}

/// `POST /tools/profile`
pub async fn profile<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<ProfileBody>,
) -> Result<Json<TextResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::ProfileOptimizer;
  let bio = tool.validate(&body.bio)?;
  text(&state, tool, prompts::profile_optimization(bio)).await
}

#[derive(Debug, Deserialize)]
pub struct ImageBody {
  /// `data:image/<type>;base64,<data>`
  pub image: String,
}

/// `POST /tools/profile/image`
pub async fn enhance_image<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<ImageBody>,
) -> Result<Json<ImageResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::ImageEnhancer;
  tool.validate(&body.image)?;
  let upload = GeneratedImage::from_data_url(body.image.trim())
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
  // An empty payload is no upload at all.
  tool.validate(&upload.data)?;

  let image = state
    .generator
    .enhance_image(&upload)
    .await
    .map_err(|e| ApiError::generation(tool, e))?;
  Ok(Json(image.into()))
}

// ─── Banner ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BannerBody {
  pub theme: String,
}

/// `POST /tools/banner`
pub async fn banner<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<BannerBody>,
) -> Result<Json<ImageResponse>, ApiError>
where
  S: ContentStore,
  G: Generator,
{
  let tool = Tool::BannerGenerator;
  let theme = tool.validate(&body.theme)?;
  let image = state
    .generator
    .generate_banner(theme)
    .await
    .map_err(|e| ApiError::generation(tool, e))?;
  Ok(Json(image.into()))
}
