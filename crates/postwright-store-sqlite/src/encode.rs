//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Enums are stored as their lowercase names; timestamps as integer epoch
//! milliseconds.

use postwright_core::record::{ContentKind, ContentRecord, Rating};

use crate::{Error, Result};

// ─── ContentKind ─────────────────────────────────────────────────────────────

pub fn encode_kind(k: ContentKind) -> &'static str {
  match k {
    ContentKind::Strategy => "strategy",
    ContentKind::Post => "post",
  }
}

pub fn decode_kind(s: &str) -> Result<ContentKind> {
  s.parse().map_err(|_| Error::UnknownKind(s.to_owned()))
}

// ─── Rating ──────────────────────────────────────────────────────────────────

pub fn encode_rating(r: Option<Rating>) -> Option<&'static str> {
  r.map(|r| match r {
    Rating::Good => "good",
    Rating::Bad => "bad",
  })
}

pub fn decode_rating(s: Option<&str>) -> Result<Option<Rating>> {
  s.map(|s| s.parse().map_err(|_| Error::UnknownRating(s.to_owned())))
    .transpose()
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `content` row.
pub struct RawRecord {
  pub id:         String,
  pub kind:       String,
  pub prompt:     String,
  pub content:    String,
  pub rating:     Option<String>,
  pub created_at: i64,
}

impl RawRecord {
  pub const COLUMNS: &'static str = "id, kind, prompt, content, rating, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      kind:       row.get(1)?,
      prompt:     row.get(2)?,
      content:    row.get(3)?,
      rating:     row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<ContentRecord> {
    Ok(ContentRecord {
      kind:       decode_kind(&self.kind)?,
      rating:     decode_rating(self.rating.as_deref())?,
      id:         self.id,
      prompt:     self.prompt,
      content:    self.content,
      created_at: self.created_at,
    })
  }
}
