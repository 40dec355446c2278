//! [`JsonFileStore`]: the single-file implementation of [`ContentStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use postwright_core::{
  record::{ContentRecord, RecordPatch},
  store::ContentStore,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{Error, Result, document};

/// A content library stored as one JSON document at `path`.
///
/// A missing file is an empty library; the file is created on first write.
/// Writes go to a sibling temporary file which is then renamed over the
/// original, so a crash mid-write leaves the previous library intact.
///
/// Access is serialised within one process. Two processes writing the same
/// file will lose updates.
#[derive(Debug)]
pub struct JsonFileStore {
  path: PathBuf,
  lock: Mutex<()>,
}

impl JsonFileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), lock: Mutex::new(()) }
  }

  pub fn path(&self) -> &Path { &self.path }

  fn io_error(&self, source: std::io::Error) -> Error {
    Error::Io { path: self.path.clone(), source }
  }

  async fn read_all(&self) -> Result<Vec<ContentRecord>> {
    match tokio::fs::read(&self.path).await {
      Ok(bytes) => document::decode(&bytes),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
      Err(e) => Err(self.io_error(e)),
    }
  }

  async fn write_all(&self, records: &[ContentRecord]) -> Result<()> {
    let bytes = document::encode(records)?;

    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| self.io_error(e))?;
    }

    let mut tmp = self.path.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &bytes)
      .await
      .map_err(|e| self.io_error(e))?;
    tokio::fs::rename(&tmp, &self.path)
      .await
      .map_err(|e| self.io_error(e))?;

    debug!(path = %self.path.display(), records = records.len(), "library written");
    Ok(())
  }
}

impl ContentStore for JsonFileStore {
  type Error = Error;

  async fn list(&self) -> Result<Vec<ContentRecord>> {
    let _guard = self.lock.lock().await;
    self.read_all().await
  }

  async fn create(&self, record: ContentRecord) -> Result<()> {
    let _guard = self.lock.lock().await;
    let mut records = self.read_all().await?;
    records.push(record);
    self.write_all(&records).await
  }

  async fn update(&self, id: &str, patch: RecordPatch) -> Result<bool> {
    let _guard = self.lock.lock().await;
    let mut records = self.read_all().await?;

    let mut found = false;
    for record in records.iter_mut().filter(|r| r.id == id) {
      patch.apply(record);
      found = true;
    }
    if found {
      self.write_all(&records).await?;
    }
    Ok(found)
  }

  async fn delete(&self, id: &str) -> Result<bool> {
    let _guard = self.lock.lock().await;
    let mut records = self.read_all().await?;

    let before = records.len();
    records.retain(|r| r.id != id);
    if records.len() == before {
      return Ok(false);
    }
    self.write_all(&records).await?;
    Ok(true)
  }
}
