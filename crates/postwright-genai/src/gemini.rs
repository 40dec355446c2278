//! [`GeminiClient`]: a [`Generator`] over the Gemini REST API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{
  CarouselSlide, GenAiError, GeneratedImage, Generator, Result,
  carousel::{parse_plan, plan_schema},
  prompts,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings, deserialised from the `[gemini]` config section.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  pub api_key:          String,
  #[serde(default = "default_base_url")]
  pub base_url:         String,
  /// Text and structured-output model.
  #[serde(default = "default_text_model")]
  pub text_model:       String,
  /// Model that edits an uploaded image.
  #[serde(default = "default_image_edit_model")]
  pub image_edit_model: String,
  /// Model that generates images from a prompt.
  #[serde(default = "default_image_model")]
  pub image_model:      String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:     u64,
}

impl GeminiConfig {
  /// Defaults for everything except the key.
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key:          api_key.into(),
      base_url:         default_base_url(),
      text_model:       default_text_model(),
      image_edit_model: default_image_edit_model(),
      image_model:      default_image_model(),
      timeout_secs:     default_timeout_secs(),
    }
  }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }
fn default_text_model() -> String { "gemini-2.5-flash".to_owned() }
fn default_image_edit_model() -> String { "gemini-2.5-flash-image".to_owned() }
fn default_image_model() -> String { "imagen-4.0-generate-001".to_owned() }
fn default_timeout_secs() -> u64 { 120 }

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
  text:        Option<String>,
  inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
  mime_type: String,
  data:      String,
}

impl GenerateContentResponse {
  fn parts(&self) -> &[ResponsePart] {
    self
      .candidates
      .first()
      .and_then(|c| c.content.as_ref())
      .map(|c| c.parts.as_slice())
      .unwrap_or_default()
  }

  fn text(&self) -> Result<String> {
    let text: String = self
      .parts()
      .iter()
      .filter_map(|p| p.text.as_deref())
      .collect();
    if text.trim().is_empty() {
      return Err(GenAiError::EmptyResponse);
    }
    Ok(text)
  }

  fn image(self) -> Result<GeneratedImage> {
    self
      .candidates
      .into_iter()
      .next()
      .and_then(|c| c.content)
      .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data))
      .map(|d| GeneratedImage { mime_type: d.mime_type, data: d.data })
      .ok_or(GenAiError::NoImage)
  }
}

#[derive(Deserialize)]
struct PredictResponse {
  #[serde(default)]
  predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
  bytes_base64_encoded: Option<String>,
  mime_type:            Option<String>,
}

impl PredictResponse {
  fn image(self) -> Result<GeneratedImage> {
    self
      .predictions
      .into_iter()
      .find_map(|p| {
        p.bytes_base64_encoded.map(|data| GeneratedImage {
          mime_type: p.mime_type.unwrap_or_else(|| "image/png".to_owned()),
          data,
        })
      })
      .ok_or(GenAiError::NoImage)
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async client for the Gemini API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiClient {
  client: Client,
  config: GeminiConfig,
}

impl GeminiClient {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    info!(
      text_model = %config.text_model,
      image_model = %config.image_model,
      "gemini client initialised"
    );
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &GeminiConfig { &self.config }

  /// `POST {base}/models/{model}:{method}`
  async fn call<T: DeserializeOwned>(
    &self,
    model: &str,
    method: &str,
    body: &Value,
  ) -> Result<T> {
    let url = format!(
      "{}/models/{model}:{method}",
      self.config.base_url.trim_end_matches('/')
    );
    debug!(model, method, "calling generation service");

    let resp = self
      .client
      .post(&url)
      .header("x-goog-api-key", &self.config.api_key)
      .json(body)
      .send()
      .await?;

    if !resp.status().is_success() {
      let status = resp.status().as_u16();
      let body = resp.text().await.unwrap_or_default();
      return Err(GenAiError::Status { status, body });
    }
    Ok(resp.json().await?)
  }

  async fn generate_content(&self, model: &str, body: &Value) -> Result<GenerateContentResponse> {
    self.call(model, "generateContent", body).await
  }

  async fn predict_image(&self, prompt: &str, aspect_ratio: &str) -> Result<GeneratedImage> {
    let body = json!({
      "instances": [{ "prompt": prompt }],
      "parameters": { "sampleCount": 1, "aspectRatio": aspect_ratio }
    });
    let resp: PredictResponse = self.call(&self.config.image_model, "predict", &body).await?;
    resp.image()
  }
}

impl Generator for GeminiClient {
  async fn generate_text(&self, prompt: &str) -> Result<String> {
    let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
    self
      .generate_content(&self.config.text_model, &body)
      .await?
      .text()
  }

  async fn generate_carousel_plan(&self, topic: &str) -> Result<Vec<CarouselSlide>> {
    let body = json!({
      "contents": [{ "parts": [{ "text": prompts::carousel_plan(topic) }] }],
      "generationConfig": {
        "responseMimeType": "application/json",
        "responseSchema": plan_schema()
      }
    });
    let text = self
      .generate_content(&self.config.text_model, &body)
      .await?
      .text()?;
    parse_plan(&text)
  }

  async fn generate_slide_image(&self, visual_suggestion: &str) -> Result<GeneratedImage> {
    self
      .predict_image(&prompts::slide_image(visual_suggestion), "1:1")
      .await
  }

  async fn generate_banner(&self, theme: &str) -> Result<GeneratedImage> {
    self.predict_image(&prompts::banner(theme), "16:9").await
  }

  async fn enhance_image(&self, image: &GeneratedImage) -> Result<GeneratedImage> {
    let body = json!({
      "contents": [{
        "parts": [
          { "inlineData": { "mimeType": image.mime_type, "data": image.data } },
          { "text": prompts::ENHANCE_HEADSHOT }
        ]
      }],
      "generationConfig": { "responseModalities": ["IMAGE"] }
    });
    self
      .generate_content(&self.config.image_edit_model, &body)
      .await?
      .image()
  }
}
