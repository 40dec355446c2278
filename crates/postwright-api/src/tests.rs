//! Router tests over a `MemoryStore` and a scripted generator.

use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use postwright_core::{
  ContentKind, ContentRecord, ContentStore, Library, MemoryStore, Rating, Tool,
};
use postwright_genai::{
  CarouselSlide, GenAiError, GeneratedImage, Generator, Result as GenResult,
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

/// Answers every call with canned output, or fails every call.
#[derive(Default)]
struct Scripted {
  fail:        bool,
  calls:       AtomicUsize,
  last_prompt: std::sync::Mutex<String>,
}

impl Scripted {
  fn failing() -> Self { Self { fail: true, ..Self::default() } }

  fn record(&self, prompt: &str) -> GenResult<()> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    *self.last_prompt.lock().unwrap() = prompt.to_owned();
    if self.fail {
      return Err(GenAiError::Status { status: 500, body: "internal".into() });
    }
    Ok(())
  }

  fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

impl Generator for Scripted {
  async fn generate_text(&self, prompt: &str) -> GenResult<String> {
    self.record(prompt)?;
    Ok(format!("generated for {} chars", prompt.len()))
  }

  async fn generate_carousel_plan(&self, topic: &str) -> GenResult<Vec<CarouselSlide>> {
    self.record(topic)?;
    Ok(
      (1..=5)
        .map(|i| CarouselSlide {
          slide:             i,
          title:             format!("Slide {i}"),
          content:           "body".into(),
          visual_suggestion: "chart".into(),
        })
        .collect(),
    )
  }

  async fn generate_slide_image(&self, visual_suggestion: &str) -> GenResult<GeneratedImage> {
    self.record(visual_suggestion)?;
    Ok(GeneratedImage::from_bytes("image/png", b"slide"))
  }

  async fn generate_banner(&self, theme: &str) -> GenResult<GeneratedImage> {
    self.record(theme)?;
    Ok(GeneratedImage::from_bytes("image/png", b"banner"))
  }

  async fn enhance_image(&self, image: &GeneratedImage) -> GenResult<GeneratedImage> {
    self.record(&image.mime_type)?;
    Ok(GeneratedImage::from_bytes("image/png", b"enhanced"))
  }
}

struct Harness {
  app:       Router,
  store:     Arc<MemoryStore>,
  generator: Arc<Scripted>,
}

fn harness_with(generator: Scripted, records: Vec<ContentRecord>) -> Harness {
  let store = Arc::new(MemoryStore::with_records(records));
  let generator = Arc::new(generator);
  let app = api_router(Library::new(Arc::clone(&store)), Arc::clone(&generator));
  Harness { app, store, generator }
}

fn harness() -> Harness { harness_with(Scripted::default(), Vec::new()) }

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();

  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

fn record(id: &str, kind: ContentKind, created_at: i64) -> ContentRecord {
  ContentRecord {
    id: id.into(),
    kind,
    prompt: "launch announcement".into(),
    content: "...".into(),
    rating: None,
    created_at,
  }
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_ok() {
  let h = harness();
  let (status, body) = send(&h.app, "GET", "/health", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "status": "ok" }));
}

// ── Records ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_and_lists_it() {
  let h = harness();
  let (status, created) = send(
    &h.app,
    "POST",
    "/records",
    Some(json!({ "kind": "post", "prompt": "idea", "content": "text" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert!(!created["id"].as_str().unwrap().is_empty());
  assert_eq!(created["tool"], "post");
  assert_eq!(created["rating"], Value::Null);

  let (status, listed) = send(&h.app, "GET", "/records", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(listed.as_array().unwrap().len(), 1);
  assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn list_filters_by_kind_newest_first() {
  let h = harness_with(Scripted::default(), vec![
    record("p-old", ContentKind::Post, 1),
    record("s", ContentKind::Strategy, 2),
    record("p-new", ContentKind::Post, 3),
  ]);

  let (_, all) = send(&h.app, "GET", "/records", None).await;
  let ids: Vec<_> = all.as_array().unwrap().iter().map(|r| r["id"].clone()).collect();
  assert_eq!(ids, [json!("p-new"), json!("s"), json!("p-old")]);

  let (_, posts) = send(&h.app, "GET", "/records?kind=post", None).await;
  assert_eq!(posts.as_array().unwrap().len(), 2);

  let (status, _) = send(&h.app, "GET", "/records?kind=carousel", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rate_update_delete_scenario() {
  let h = harness_with(Scripted::default(), vec![record("a1", ContentKind::Post, 1000)]);

  let (status, _) = send(
    &h.app,
    "PUT",
    "/records/a1/rating",
    Some(json!({ "rating": "good" })),
  )
  .await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (_, listed) = send(&h.app, "GET", "/records", None).await;
  assert_eq!(listed[0]["rating"], "good");
  assert_eq!(listed[0]["timestamp"], 1000);

  let (status, _) = send(
    &h.app,
    "PATCH",
    "/records/a1",
    Some(json!({ "content": "edited", "rating": null })),
  )
  .await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let stored = h.store.list().await.unwrap();
  assert_eq!(stored[0].content, "edited");
  assert_eq!(stored[0].rating, None);
  assert_eq!(stored[0].prompt, "launch announcement");

  let (status, _) = send(&h.app, "DELETE", "/records/a1", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert!(h.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_record_is_404() {
  let h = harness_with(Scripted::default(), vec![record("a1", ContentKind::Post, 1)]);

  let (status, body) = send(&h.app, "DELETE", "/records/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("nope"));

  let (status, _) = send(
    &h.app,
    "PUT",
    "/records/nope/rating",
    Some(json!({ "rating": Rating::Bad })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(h.store.list().await.unwrap().len(), 1);
}

// ── Tools ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn strategy_returns_text() {
  let h = harness();
  let (status, body) = send(
    &h.app,
    "POST",
    "/tools/strategy",
    Some(json!({ "topic": "  remote work  " })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["text"].as_str().unwrap().starts_with("generated"));
  assert!(h.generator.last_prompt.lock().unwrap().contains("\"remote work\""));
}

#[tokio::test]
async fn invalid_input_never_reaches_generator() {
  let h = harness();
  let cases = [
    ("/tools/strategy", json!({ "topic": "" }), Tool::ContentStrategy.empty_message().to_owned()),
    ("/tools/strategy", json!({ "topic": "AI" }), Tool::ContentStrategy.too_short_message()),
    ("/tools/post", json!({ "idea": "short" }), Tool::PostWriter.too_short_message()),
    ("/tools/carousel", json!({ "topic": "cloud" }), Tool::CarouselCreator.too_short_message()),
    ("/tools/profile", json!({ "bio": "Engineer." }), Tool::ProfileOptimizer.too_short_message()),
    ("/tools/banner", json!({ "theme": "   " }), Tool::BannerGenerator.empty_message().to_owned()),
    ("/tools/profile/image", json!({ "image": "" }), Tool::ImageEnhancer.empty_message().to_owned()),
    (
      "/tools/profile/image",
      json!({ "image": "data:image/png;base64," }),
      Tool::ImageEnhancer.empty_message().to_owned(),
    ),
  ];

  for (uri, body, message) in cases {
    let (status, resp) = send(&h.app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert_eq!(resp["error"], message, "{uri}");
  }
  assert_eq!(h.generator.calls(), 0);
}

#[tokio::test]
async fn exact_minimum_is_accepted() {
  let h = harness();
  let (status, _) = send(
    &h.app,
    "POST",
    "/tools/post",
    Some(json!({ "idea": "0123456789", "style": "how-to" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert!(h
    .generator
    .last_prompt
    .lock()
    .unwrap()
    .contains("How-To Guides"));
}

#[tokio::test]
async fn generation_failure_is_502_with_static_message() {
  let h = harness_with(Scripted::failing(), Vec::new());
  let (status, body) = send(
    &h.app,
    "POST",
    "/tools/profile",
    Some(json!({ "bio": "x".repeat(60) })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  assert_eq!(body["error"], Tool::ProfileOptimizer.failure_message());
  assert!(!body.to_string().contains("internal"));
  assert_eq!(h.generator.calls(), 1);
}

#[tokio::test]
async fn carousel_returns_five_slides() {
  let h = harness();
  let (status, body) = send(
    &h.app,
    "POST",
    "/tools/carousel",
    Some(json!({ "topic": "negotiating a raise" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let slides = body["slides"].as_array().unwrap();
  assert_eq!(slides.len(), 5);
  assert_eq!(slides[0]["visualSuggestion"], "chart");
}

#[tokio::test]
async fn images_come_back_as_data_urls() {
  let h = harness();

  let (status, body) = send(
    &h.app,
    "POST",
    "/tools/carousel/image",
    Some(json!({ "visualSuggestion": "a bar chart" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let slide = GeneratedImage::from_data_url(body["image"].as_str().unwrap()).unwrap();
  assert_eq!(slide.bytes().unwrap(), b"slide");

  let upload = GeneratedImage::from_bytes("image/jpeg", b"me").to_data_url();
  let (status, body) = send(
    &h.app,
    "POST",
    "/tools/profile/image",
    Some(json!({ "image": upload })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["image"].as_str().unwrap().starts_with("data:image/png;base64,"));
  assert_eq!(*h.generator.last_prompt.lock().unwrap(), "image/jpeg");
}

#[tokio::test]
async fn malformed_upload_is_400() {
  let h = harness();
  let (status, _) = send(
    &h.app,
    "POST",
    "/tools/profile/image",
    Some(json!({ "image": "data:text/plain;base64,aGk=" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(h.generator.calls(), 0);
}

#[tokio::test]
async fn posting_times_needs_both_timezones() {
  let h = harness();
  let (status, _) = send(
    &h.app,
    "POST",
    "/tools/posting-times",
    Some(json!({ "industry": "fintech", "target_timezone": "", "local_timezone": "UTC" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(
    &h.app,
    "POST",
    "/tools/posting-times",
    Some(json!({
      "industry": "fintech",
      "target_timezone": "Europe/London",
      "local_timezone": "America/Chicago"
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert!(h.generator.last_prompt.lock().unwrap().contains("Europe/London"));
}
