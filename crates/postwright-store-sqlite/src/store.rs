//! [`SqliteStore`]: the SQLite implementation of [`ContentStore`].

use std::path::Path;

use postwright_core::{
  record::{ContentRecord, RecordPatch},
  store::ContentStore,
};
use tracing::debug;

use crate::{
  Error, Result,
  encode::{RawRecord, encode_kind, encode_rating},
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A content library backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store; useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let found: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("PRAGMA user_version", [], |r| r.get(0))?)
      })
      .await?;

    if found > SCHEMA_VERSION {
      return Err(Error::UnsupportedSchema { found, supported: SCHEMA_VERSION });
    }

    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    debug!(from = found, to = SCHEMA_VERSION, "sqlite schema ready");
    Ok(())
  }
}

// ─── ContentStore impl ───────────────────────────────────────────────────────

impl ContentStore for SqliteStore {
  type Error = Error;

  async fn list(&self) -> Result<Vec<ContentRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {} FROM content", RawRecord::COLUMNS))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn create(&self, record: ContentRecord) -> Result<()> {
    let kind_str   = encode_kind(record.kind);
    let rating_str = encode_rating(record.rating);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO content (id, kind, prompt, content, rating, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            record.id,
            kind_str,
            record.prompt,
            record.content,
            rating_str,
            record.created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update(&self, id: &str, patch: RecordPatch) -> Result<bool> {
    let id_str     = id.to_owned();
    let set_rating = patch.rating.is_some();
    let rating_str = patch.rating.and_then(encode_rating);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE content SET
             prompt  = COALESCE(?2, prompt),
             content = COALESCE(?3, content),
             rating  = CASE WHEN ?4 THEN ?5 ELSE rating END
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            patch.prompt,
            patch.content,
            set_rating,
            rating_str,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete(&self, id: &str) -> Result<bool> {
    let id_str = id.to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM content WHERE id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
