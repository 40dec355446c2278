//! Async HTTP client wrapping the Postwright JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use postwright_core::{ContentRecord, KindFilter, NewRecord, PostStyle, Rating};
use postwright_genai::{CarouselSlide, GeneratedImage};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;

/// Connection settings for the Postwright API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Postwright JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Deserialize)]
struct TextBody {
  text: String,
}

#[derive(Deserialize)]
struct ImageBody {
  image: String,
}

#[derive(Deserialize)]
struct SlidesBody {
  slides: Vec<CarouselSlide>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    // Image generation can take a while.
    let client = Client::builder()
      .timeout(Duration::from_secs(180))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `/api/records/<id>/<tail..>` with `id` percent-encoded as one path
  /// segment.
  fn record_url(&self, id: &str, tail: &[&str]) -> Result<Url> {
    let mut url = Url::parse(&self.url("/records")).context("invalid server URL")?;
    url
      .path_segments_mut()
      .map_err(|()| anyhow!("server URL cannot take a path"))?
      .push(id)
      .extend(tail);
    Ok(url)
  }

  /// Pass a successful response through; turn anything else into the
  /// server's `{"error": ..}` message.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
      Ok(body) => body.error,
      Err(_) => format!("{what} → {status}"),
    };
    Err(anyhow!(message))
  }

  async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let resp = self
      .client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    Self::check(resp, &format!("POST {path}"))
      .await?
      .json()
      .await
      .with_context(|| format!("deserialising response from {path}"))
  }

  async fn text(&self, path: &str, body: serde_json::Value) -> Result<String> {
    let body: TextBody = self.post_json(path, &body).await?;
    Ok(body.text)
  }

  async fn image(&self, path: &str, body: serde_json::Value) -> Result<GeneratedImage> {
    let body: ImageBody = self.post_json(path, &body).await?;
    GeneratedImage::from_data_url(&body.image).context("server returned an unreadable image")
  }

  // ── Tools ─────────────────────────────────────────────────────────────────

  /// `POST /api/tools/strategy`
  pub async fn strategy(&self, topic: &str) -> Result<String> {
    self.text("/tools/strategy", json!({ "topic": topic })).await
  }

  /// `POST /api/tools/post`
  pub async fn post(&self, idea: &str, style: PostStyle) -> Result<String> {
    self
      .text("/tools/post", json!({ "idea": idea, "style": style }))
      .await
  }

  /// `POST /api/tools/carousel`
  pub async fn carousel(&self, topic: &str) -> Result<Vec<CarouselSlide>> {
    let body: SlidesBody = self
      .post_json("/tools/carousel", &json!({ "topic": topic }))
      .await?;
    Ok(body.slides)
  }

  /// `POST /api/tools/carousel/image`
  pub async fn slide_image(&self, visual_suggestion: &str) -> Result<GeneratedImage> {
    self
      .image(
        "/tools/carousel/image",
        json!({ "visual_suggestion": visual_suggestion }),
      )
      .await
  }

  /// `POST /api/tools/posting-times`
  pub async fn posting_times(
    &self,
    industry: &str,
    target_timezone: &str,
    local_timezone: &str,
  ) -> Result<String> {
    self
      .text(
        "/tools/posting-times",
        json!({
          "industry": industry,
          "target_timezone": target_timezone,
          "local_timezone": local_timezone,
        }),
      )
      .await
  }

  /// `POST /api/tools/profile`
  pub async fn optimize_profile(&self, bio: &str) -> Result<String> {
    self.text("/tools/profile", json!({ "bio": bio })).await
  }

  /// `POST /api/tools/profile/image`
  pub async fn enhance_image(&self, image: &GeneratedImage) -> Result<GeneratedImage> {
    self
      .image("/tools/profile/image", json!({ "image": image.to_data_url() }))
      .await
  }

  /// `POST /api/tools/banner`
  pub async fn banner(&self, theme: &str) -> Result<GeneratedImage> {
    self.image("/tools/banner", json!({ "theme": theme })).await
  }

  // ── Records ───────────────────────────────────────────────────────────────

  /// `GET /api/records?kind=<filter>`
  pub async fn list_records(&self, kind: KindFilter) -> Result<Vec<ContentRecord>> {
    let resp = self
      .client
      .get(self.url("/records"))
      .query(&[("kind", kind.to_string())])
      .send()
      .await
      .context("GET /records failed")?;
    Self::check(resp, "GET /records")
      .await?
      .json()
      .await
      .context("deserialising records")
  }

  /// `POST /api/records`
  pub async fn save(&self, record: &NewRecord) -> Result<ContentRecord> {
    self.post_json("/records", record).await
  }

  /// `PUT /api/records/:id/rating`
  pub async fn rate(&self, id: &str, rating: Option<Rating>) -> Result<()> {
    let url = self.record_url(id, &["rating"])?;
    let what = format!("PUT {}", url.path());
    let resp = self
      .client
      .put(url)
      .json(&json!({ "rating": rating }))
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    Self::check(resp, &what).await?;
    Ok(())
  }

  /// `DELETE /api/records/:id`
  pub async fn delete(&self, id: &str) -> Result<()> {
    let url = self.record_url(id, &[])?;
    let what = format!("DELETE {}", url.path());
    let resp = self
      .client
      .delete(url)
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    Self::check(resp, &what).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig { base_url: base_url.into() }).unwrap()
  }

  #[test]
  fn record_ids_are_one_encoded_segment() {
    let c = client("http://localhost:8080/");
    assert_eq!(
      c.record_url("a/b?c#d", &["rating"]).unwrap().as_str(),
      "http://localhost:8080/api/records/a%2Fb%3Fc%23d/rating"
    );
    assert_eq!(
      c.record_url("3f2a", &[]).unwrap().as_str(),
      "http://localhost:8080/api/records/3f2a"
    );
  }

  #[test]
  fn base_path_is_kept() {
    let c = client("http://proxy.local/postwright");
    assert_eq!(
      c.record_url("x", &[]).unwrap().as_str(),
      "http://proxy.local/postwright/api/records/x"
    );
  }
}
