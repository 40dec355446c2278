//! Content records: the only persisted entity.
//!
//! A record is a piece of generated text saved by the user together with the
//! input that produced it. Records are created by an explicit save, mutated by
//! rating, and removed by an explicit delete.

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Which tool produced a record.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
  Strategy,
  Post,
}

impl ContentKind {
  /// Human-readable tool name for listings.
  pub fn label(self) -> &'static str {
    match self {
      Self::Strategy => "Content Strategy",
      Self::Post => "Post",
    }
  }
}

/// The user's verdict on a saved record.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rating {
  Good,
  Bad,
}

// ─── ContentRecord ───────────────────────────────────────────────────────────

/// A saved unit of generated content.
///
/// The serialised field names (`tool`, `timestamp`) match the library format
/// written by earlier versions; `kind` and `createdAt` are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
  /// Opaque identifier, unique within a store.
  pub id:         String,
  #[serde(rename = "tool", alias = "kind")]
  pub kind:       ContentKind,
  pub prompt:     String,
  pub content:    String,
  #[serde(default)]
  pub rating:     Option<Rating>,
  /// Epoch milliseconds; never changes after creation.
  #[serde(rename = "timestamp", alias = "createdAt")]
  pub created_at: i64,
}

// ─── NewRecord ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContentStore::create_with_generated_id`].
/// The id and creation time are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
  pub kind:    ContentKind,
  pub prompt:  String,
  pub content: String,
}

impl NewRecord {
  pub fn new(
    kind: ContentKind,
    prompt: impl Into<String>,
    content: impl Into<String>,
  ) -> Self {
    Self { kind, prompt: prompt.into(), content: content.into() }
  }

  /// Complete the record with an id and creation timestamp. Unrated.
  pub fn into_record(self, id: String, created_at: i64) -> ContentRecord {
    ContentRecord {
      id,
      kind: self.kind,
      prompt: self.prompt,
      content: self.content,
      rating: None,
      created_at,
    }
  }
}

/// A fresh collision-free record id (hyphenated UUID v4).
pub fn new_record_id() -> String { Uuid::new_v4().to_string() }

/// The current time in epoch milliseconds.
pub fn now_millis() -> i64 { Utc::now().timestamp_millis() }

// ─── RecordPatch ─────────────────────────────────────────────────────────────

/// A partial update merged into an existing record.
///
/// `id`, `kind` and `created_at` are not patchable. For `rating`, an absent
/// field leaves the rating alone while an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prompt:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "present"
  )]
  pub rating:  Option<Option<Rating>>,
}

impl RecordPatch {
  /// A patch that only sets (or clears) the rating.
  pub fn rating(rating: Option<Rating>) -> Self {
    Self { rating: Some(rating), ..Self::default() }
  }

  /// Merge this patch into `record` in place.
  pub fn apply(&self, record: &mut ContentRecord) {
    if let Some(prompt) = &self.prompt {
      record.prompt.clone_from(prompt);
    }
    if let Some(content) = &self.content {
      record.content.clone_from(content);
    }
    if let Some(rating) = self.rating {
      record.rating = rating;
    }
  }
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record() -> ContentRecord {
    ContentRecord {
      id:         "a1".into(),
      kind:       ContentKind::Post,
      prompt:     "launch announcement".into(),
      content:    "We are live.".into(),
      rating:     None,
      created_at: 1000,
    }
  }

  #[test]
  fn serialises_with_library_field_names() {
    let json = serde_json::to_value(record()).unwrap();
    assert_eq!(json["tool"], "post");
    assert_eq!(json["timestamp"], 1000);
    assert!(json["rating"].is_null());
    assert!(json.get("kind").is_none());
  }

  #[test]
  fn reads_alternate_field_names_and_ignores_extras() {
    let json = r#"{
      "id": "x", "kind": "strategy", "prompt": "p", "content": "c",
      "createdAt": 5, "pinned": true
    }"#;
    let r: ContentRecord = serde_json::from_str(json).unwrap();
    assert_eq!(r.kind, ContentKind::Strategy);
    assert_eq!(r.created_at, 5);
    assert_eq!(r.rating, None);
  }

  #[test]
  fn patch_sets_rating_and_keeps_other_fields() {
    let mut r = record();
    RecordPatch::rating(Some(Rating::Good)).apply(&mut r);
    assert_eq!(r.rating, Some(Rating::Good));
    assert_eq!(r.created_at, 1000);
    assert_eq!(r.prompt, "launch announcement");
  }

  #[test]
  fn patch_null_rating_clears_but_absent_rating_keeps() {
    let clear: RecordPatch = serde_json::from_str(r#"{"rating":null}"#).unwrap();
    assert_eq!(clear.rating, Some(None));

    let keep: RecordPatch = serde_json::from_str(r#"{"content":"new"}"#).unwrap();
    assert_eq!(keep.rating, None);

    let mut r = record();
    r.rating = Some(Rating::Bad);
    keep.apply(&mut r);
    assert_eq!(r.rating, Some(Rating::Bad));
    assert_eq!(r.content, "new");
    clear.apply(&mut r);
    assert_eq!(r.rating, None);
  }

  #[test]
  fn kind_parses_from_lowercase() {
    assert_eq!("post".parse::<ContentKind>().unwrap(), ContentKind::Post);
    assert_eq!(Rating::Good.to_string(), "good");
  }
}
