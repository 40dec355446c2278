//! One-shot subcommands: the generation tools and library maintenance.
//!
//! Every tool validates its input locally first; a rejected input is reported
//! without contacting the server.

use std::{
  collections::BTreeMap,
  future::Future,
  io::{self, BufRead, Write},
  path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use futures_util::future::join_all;
use postwright_core::{ContentKind, KindFilter, NewRecord, PostStyle, Rating, Tool};
use postwright_genai::{CarouselSlide, GeneratedImage, image::mime_for_extension};
use tracing::warn;

use crate::client::ApiClient;

// ─── Text tools ───────────────────────────────────────────────────────────────

pub async fn strategy(client: &ApiClient, topic: &str, save: bool) -> Result<()> {
  let topic = Tool::ContentStrategy.validate(topic)?;
  let text = client.strategy(topic).await?;
  println!("{text}");
  if save {
    save_text(client, ContentKind::Strategy, topic, text).await?;
  }
  Ok(())
}

pub async fn post(
  client: &ApiClient,
  idea: &str,
  style: PostStyle,
  save: bool,
) -> Result<()> {
  let idea = Tool::PostWriter.validate(idea)?;
  let text = client.post(idea, style).await?;
  println!("{text}");
  if save {
    save_text(client, ContentKind::Post, idea, text).await?;
  }
  Ok(())
}

async fn save_text(
  client: &ApiClient,
  kind: ContentKind,
  prompt: &str,
  content: String,
) -> Result<()> {
  let record = client.save(&NewRecord::new(kind, prompt, content)).await?;
  eprintln!("Saved to library as {}", record.id);
  Ok(())
}

pub async fn optimize_profile(
  client: &ApiClient,
  bio: Option<String>,
  file: Option<&Path>,
) -> Result<()> {
  let bio = match (bio, file) {
    (Some(bio), _) => bio,
    (None, Some(path)) => std::fs::read_to_string(path)
      .with_context(|| format!("reading {}", path.display()))?,
    (None, None) => String::new(),
  };
  let bio = Tool::ProfileOptimizer.validate(&bio)?;
  println!("{}", client.optimize_profile(bio).await?);
  Ok(())
}

// ─── Carousel ─────────────────────────────────────────────────────────────────

pub async fn carousel(client: &ApiClient, topic: &str, images: Option<&Path>) -> Result<()> {
  let topic = Tool::CarouselCreator.validate(topic)?;
  let slides = client.carousel(topic).await?;

  for slide in &slides {
    println!("Slide {}: {}", slide.slide, slide.title);
    println!("  {}", slide.content);
    println!("  Visual: {}", slide.visual_suggestion);
    println!();
  }

  let Some(dir) = images else { return Ok(()) };
  std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

  let results = by_slide(&slides, |slide| client.slide_image(&slide.visual_suggestion)).await;
  for (n, result) in results {
    match result {
      Ok(image) => {
        let path = dir.join(format!("slide-{n}.{}", image.extension()));
        write_image(&path, &image)?;
        eprintln!("Slide {n}: wrote {}", path.display());
      }
      Err(e) => eprintln!("Slide {n}: {e}"),
    }
  }
  Ok(())
}

/// Run `request` for every slide concurrently and key each result by the
/// slide's 1-based position in `slides`, whatever order the requests finish
/// in.
pub async fn by_slide<'a, F, Fut, T>(
  slides: &'a [CarouselSlide],
  request: F,
) -> BTreeMap<usize, T>
where
  F: Fn(&'a CarouselSlide) -> Fut,
  Fut: Future<Output = T>,
{
  let requests = slides.iter().enumerate().map(|(i, slide)| {
    let fut = request(slide);
    async move { (i + 1, fut.await) }
  });
  join_all(requests).await.into_iter().collect()
}

// ─── Posting times ────────────────────────────────────────────────────────────

pub async fn times(client: &ApiClient, industry: &str, target: &str) -> Result<()> {
  let industry = Tool::PostTimeFinder.validate(industry)?;
  let target = parse_timezone(target)?;
  let local = local_timezone();

  let now = Utc::now();
  println!(
    "Now: {} in {} / {} locally ({})",
    now.with_timezone(&target).format("%a %H:%M"),
    target.name(),
    now.with_timezone(&local).format("%a %H:%M"),
    local.name(),
  );
  println!();

  let text = client
    .posting_times(industry, target.name(), local.name())
    .await?;
  println!("{text}");
  Ok(())
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
  name
    .trim()
    .parse::<Tz>()
    .map_err(|_| anyhow!("unknown timezone {name:?} (expected an IANA name such as Europe/London)"))
}

/// The system's IANA timezone, or UTC if it cannot be determined.
fn local_timezone() -> Tz {
  match iana_time_zone::get_timezone() {
    Ok(name) => name.parse().unwrap_or_else(|_| {
      warn!(%name, "unrecognised local timezone; using UTC");
      Tz::UTC
    }),
    Err(e) => {
      warn!(error = %e, "could not determine local timezone; using UTC");
      Tz::UTC
    }
  }
}

// ─── Images ───────────────────────────────────────────────────────────────────

pub async fn enhance(client: &ApiClient, input: &Path, out: Option<PathBuf>) -> Result<()> {
  let upload = read_image(input)?;
  let image = client.enhance_image(&upload).await?;

  let out = out.unwrap_or_else(|| {
    let stem = input
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_else(|| "profile".to_owned());
    input.with_file_name(format!("{stem}-enhanced.{}", image.extension()))
  });
  write_image(&out, &image)?;
  eprintln!("Wrote {}", out.display());
  Ok(())
}

pub async fn banner(client: &ApiClient, theme: &str, out: Option<PathBuf>) -> Result<()> {
  let theme = Tool::BannerGenerator.validate(theme)?;
  let image = client.banner(theme).await?;

  let out = out.unwrap_or_else(|| PathBuf::from(format!("banner.{}", image.extension())));
  write_image(&out, &image)?;
  eprintln!("Wrote {}", out.display());
  Ok(())
}

/// Load an upload from disk, rejecting empty files and unknown types.
pub fn read_image(path: &Path) -> Result<GeneratedImage> {
  let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
  if bytes.is_empty() {
    bail!(Tool::ImageEnhancer.empty_message());
  }
  let mime = path
    .extension()
    .and_then(|e| e.to_str())
    .and_then(mime_for_extension)
    .ok_or_else(|| anyhow!("{} is not a PNG, JPEG, WebP or GIF image", path.display()))?;
  Ok(GeneratedImage::from_bytes(mime, &bytes))
}

fn write_image(path: &Path, image: &GeneratedImage) -> Result<()> {
  let bytes = image.bytes()?;
  std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

// ─── Library ──────────────────────────────────────────────────────────────────

pub async fn list(client: &ApiClient, kind: KindFilter) -> Result<()> {
  let records = client.list_records(kind).await?;
  if records.is_empty() {
    println!("No saved content yet.");
    return Ok(());
  }
  for r in records {
    println!(
      "{}  {:<16}  {:<4}  {}  {}",
      r.id,
      r.kind.label(),
      r.rating.map(|r| r.to_string()).unwrap_or_default(),
      format_timestamp(r.created_at),
      truncate(&r.prompt, 50),
    );
  }
  Ok(())
}

pub async fn rate(client: &ApiClient, id: &str, rating: Option<Rating>) -> Result<()> {
  client.rate(id, rating).await?;
  match rating {
    Some(r) => eprintln!("Rated {id} {r}"),
    None => eprintln!("Cleared rating on {id}"),
  }
  Ok(())
}

pub async fn delete(client: &ApiClient, id: &str, yes: bool) -> Result<()> {
  if !yes && !confirm(&format!("Delete {id}? This cannot be undone. [y/N] "))? {
    eprintln!("Kept {id}");
    return Ok(());
  }
  client.delete(id).await?;
  eprintln!("Deleted {id}");
  Ok(())
}

fn confirm(question: &str) -> Result<bool> {
  eprint!("{question}");
  io::stderr().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

// ─── Formatting ───────────────────────────────────────────────────────────────

/// Epoch milliseconds as local `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(millis: i64) -> String {
  DateTime::<Utc>::from_timestamp_millis(millis)
    .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
    .unwrap_or_else(|| "—".to_owned())
}

/// First line of `s`, cut to `max` characters.
pub fn truncate(s: &str, max: usize) -> String {
  let line = s.lines().next().unwrap_or_default();
  if line.chars().count() <= max {
    return line.to_owned();
  }
  let mut out: String = line.chars().take(max.saturating_sub(1)).collect();
  out.push('…');
  out
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  fn slides() -> Vec<CarouselSlide> {
    (1..=5)
      .map(|i| CarouselSlide {
        slide:             i,
        title:             format!("t{i}"),
        content:           String::new(),
        visual_suggestion: format!("v{i}"),
      })
      .collect()
  }

  #[tokio::test]
  async fn slide_results_keyed_by_position() {
    let slides = slides();
    // Later slides finish first.
    let results = by_slide(&slides, |slide| async move {
      tokio::time::sleep(Duration::from_millis(u64::from(6 - slide.slide) * 5)).await;
      if slide.slide == 3 {
        Err("quota")
      } else {
        Ok(slide.visual_suggestion.clone())
      }
    })
    .await;

    assert_eq!(results.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    assert_eq!(results[&1], Ok("v1".to_owned()));
    assert_eq!(results[&5], Ok("v5".to_owned()));
    assert_eq!(results[&3], Err("quota"));
  }

  #[tokio::test]
  async fn repeated_slide_numbers_keep_every_result() {
    let mut slides = slides();
    for slide in &mut slides {
      slide.slide = 1;
    }
    let results = by_slide(&slides, |slide| async move { slide.visual_suggestion.clone() }).await;
    assert_eq!(results.len(), 5);
    assert_eq!(results[&3], "v3");
  }

  #[tokio::test]
  async fn short_input_never_reaches_the_server() {
    use std::net::TcpListener;

    use postwright_core::ValidationError;

    use crate::client::ApiConfig;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let client = ApiClient::new(ApiConfig {
      base_url: format!("http://{}", listener.local_addr().unwrap()),
    })
    .unwrap();

    let rejected = [
      (strategy(&client, "AI", false).await, Tool::ContentStrategy),
      (post(&client, "   too short   ", PostStyle::HowTo, true).await, Tool::PostWriter),
      (carousel(&client, "", None).await, Tool::CarouselCreator),
      (times(&client, "law", "Europe/London").await, Tool::PostTimeFinder),
      (optimize_profile(&client, Some("I write code.".into()), None).await, Tool::ProfileOptimizer),
      (banner(&client, " ", None).await, Tool::BannerGenerator),
    ];
    for (result, tool) in rejected {
      let err = result.unwrap_err();
      let validation = err.downcast_ref::<ValidationError>().unwrap();
      assert_eq!(validation.tool, tool);
    }

    let accepted = listener.accept().map(|_| ());
    assert_eq!(accepted.unwrap_err().kind(), io::ErrorKind::WouldBlock);
  }

  #[test]
  fn timezone_names() {
    assert_eq!(parse_timezone("Europe/London").unwrap().name(), "Europe/London");
    assert_eq!(parse_timezone(" America/New_York ").unwrap().name(), "America/New_York");
    assert!(parse_timezone("Mars/Olympus").is_err());
  }

  #[test]
  fn reading_uploads() {
    let dir = tempfile::tempdir().unwrap();

    let empty = dir.path().join("empty.png");
    std::fs::write(&empty, b"").unwrap();
    let err = read_image(&empty).unwrap_err();
    assert_eq!(err.to_string(), Tool::ImageEnhancer.empty_message());

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, b"hello").unwrap();
    assert!(read_image(&text).is_err());

    let photo = dir.path().join("me.JPG");
    std::fs::write(&photo, b"\xff\xd8").unwrap();
    let image = read_image(&photo).unwrap();
    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.bytes().unwrap(), b"\xff\xd8");
  }

  #[test]
  fn truncation() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("first line\nsecond", 20), "first line");
    assert_eq!(truncate("abcdefghij", 5), "abcd…");
  }
}
