//! [`Library`]: the fail-soft facade every caller uses to reach a store.
//!
//! Persistence failures never reach the caller. A failed read yields an empty
//! collection; a failed write is logged and dropped, and the caller's own copy
//! of the record stays the source of truth for the session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{error, warn};

use crate::{
  record::{
    ContentKind, ContentRecord, NewRecord, Rating, RecordPatch, new_record_id,
    now_millis,
  },
  store::ContentStore,
};

/// Which records a listing shows.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KindFilter {
  #[default]
  All,
  Strategy,
  Post,
}

impl KindFilter {
  pub fn matches(self, kind: ContentKind) -> bool {
    match self {
      Self::All => true,
      Self::Strategy => kind == ContentKind::Strategy,
      Self::Post => kind == ContentKind::Post,
    }
  }

  /// The next filter in `All → Strategy → Post → All` order.
  pub fn next(self) -> Self {
    match self {
      Self::All => Self::Strategy,
      Self::Strategy => Self::Post,
      Self::Post => Self::All,
    }
  }
}

/// Fail-soft access to a [`ContentStore`].
pub struct Library<S> {
  store: Arc<S>,
}

impl<S> Clone for Library<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContentStore> Library<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Every record, unordered. Empty if the backend cannot be read.
  pub async fn list(&self) -> Vec<ContentRecord> {
    match self.store.list().await {
      Ok(records) => records,
      Err(e) => {
        warn!(error = %e, "content library unreadable; treating as empty");
        Vec::new()
      }
    }
  }

  /// Append `record`. Failures are logged and dropped.
  pub async fn create(&self, record: ContentRecord) {
    if let Err(e) = self.store.create(record).await {
      error!(error = %e, "failed to save content record");
    }
  }

  /// Save generated content under a fresh id and return the record.
  ///
  /// The record is returned even if the write failed.
  pub async fn save(
    &self,
    kind: ContentKind,
    prompt: impl Into<String>,
    content: impl Into<String>,
  ) -> ContentRecord {
    let record = NewRecord::new(kind, prompt, content)
      .into_record(new_record_id(), now_millis());
    self.create(record.clone()).await;
    record
  }

  /// Merge `patch` into the record with `id`. `false` if absent or failed.
  pub async fn update(&self, id: &str, patch: RecordPatch) -> bool {
    match self.store.update(id, patch).await {
      Ok(found) => found,
      Err(e) => {
        error!(error = %e, id, "failed to update content record");
        false
      }
    }
  }

  pub async fn rate(&self, id: &str, rating: Option<Rating>) -> bool {
    self.update(id, RecordPatch::rating(rating)).await
  }

  /// Remove the record with `id`. `false` if absent or failed.
  pub async fn delete(&self, id: &str) -> bool {
    match self.store.delete(id).await {
      Ok(found) => found,
      Err(e) => {
        error!(error = %e, id, "failed to delete content record");
        false
      }
    }
  }

  /// Records matching `filter`, most recent first.
  pub async fn browse(&self, filter: KindFilter) -> Vec<ContentRecord> {
    let mut records = self.list().await;
    records.retain(|r| filter.matches(r.kind));
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records
  }
}

#[cfg(test)]
mod tests {
  use std::io;

  use super::*;
  use crate::memory::MemoryStore;

  /// A backend whose every operation fails.
  struct Broken;

  impl ContentStore for Broken {
    type Error = io::Error;

    async fn list(&self) -> io::Result<Vec<ContentRecord>> {
      Err(io::Error::other("unavailable"))
    }

    async fn create(&self, _record: ContentRecord) -> io::Result<()> {
      Err(io::Error::other("read-only"))
    }

    async fn update(&self, _id: &str, _patch: RecordPatch) -> io::Result<bool> {
      Err(io::Error::other("read-only"))
    }

    async fn delete(&self, _id: &str) -> io::Result<bool> {
      Err(io::Error::other("read-only"))
    }
  }

  fn record(id: &str, kind: ContentKind, created_at: i64) -> ContentRecord {
    ContentRecord {
      id: id.into(),
      kind,
      prompt: format!("prompt {id}"),
      content: format!("content {id}"),
      rating: None,
      created_at,
    }
  }

  #[tokio::test]
  async fn failures_are_masked() {
    let lib = Library::new(Arc::new(Broken));
    assert!(lib.list().await.is_empty());

    let saved = lib.save(ContentKind::Post, "idea", "text").await;
    assert_eq!(saved.prompt, "idea");
    assert!(!saved.id.is_empty());

    assert!(!lib.rate(&saved.id, Some(Rating::Good)).await);
    assert!(!lib.delete(&saved.id).await);
  }

  #[tokio::test]
  async fn browse_sorts_newest_first_and_filters() {
    let store = MemoryStore::with_records(vec![
      record("old", ContentKind::Post, 10),
      record("new", ContentKind::Post, 30),
      record("mid", ContentKind::Strategy, 20),
    ]);
    let lib = Library::new(Arc::new(store));

    let ids: Vec<_> = lib
      .browse(KindFilter::All)
      .await
      .into_iter()
      .map(|r| r.id)
      .collect();
    assert_eq!(ids, ["new", "mid", "old"]);

    let posts = lib.browse(KindFilter::Post).await;
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|r| r.kind == ContentKind::Post));
  }

  #[tokio::test]
  async fn save_then_rate_persists() {
    let lib = Library::new(Arc::new(MemoryStore::new()));
    let saved = lib.save(ContentKind::Strategy, "topic", "plan").await;
    assert!(lib.rate(&saved.id, Some(Rating::Bad)).await);

    let all = lib.list().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].rating, Some(Rating::Bad));
    assert_eq!(all[0].created_at, saved.created_at);
  }

  #[test]
  fn filter_cycles() {
    assert_eq!(KindFilter::All.next(), KindFilter::Strategy);
    assert_eq!(KindFilter::Post.next(), KindFilter::All);
    assert_eq!("post".parse::<KindFilter>().unwrap(), KindFilter::Post);
  }
}
