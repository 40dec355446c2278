//! [`MemoryStore`]: a process-local [`ContentStore`].

use std::sync::RwLock;

use crate::{
  Error, Result,
  record::{ContentRecord, RecordPatch},
  store::ContentStore,
};

/// Keeps the collection in a `Vec` behind a lock. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
  records: RwLock<Vec<ContentRecord>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Seed the store with existing records.
  pub fn with_records(records: Vec<ContentRecord>) -> Self {
    Self { records: RwLock::new(records) }
  }
}

impl ContentStore for MemoryStore {
  type Error = Error;

  async fn list(&self) -> Result<Vec<ContentRecord>> {
    let records = self.records.read().map_err(|_| Error::Poisoned)?;
    Ok(records.clone())
  }

  async fn create(&self, record: ContentRecord) -> Result<()> {
    let mut records = self.records.write().map_err(|_| Error::Poisoned)?;
    records.push(record);
    Ok(())
  }

  async fn update(&self, id: &str, patch: RecordPatch) -> Result<bool> {
    let mut records = self.records.write().map_err(|_| Error::Poisoned)?;
    let mut found = false;
    for record in records.iter_mut().filter(|r| r.id == id) {
      patch.apply(record);
      found = true;
    }
    Ok(found)
  }

  async fn delete(&self, id: &str) -> Result<bool> {
    let mut records = self.records.write().map_err(|_| Error::Poisoned)?;
    let before = records.len();
    records.retain(|r| r.id != id);
    Ok(records.len() != before)
  }
}
