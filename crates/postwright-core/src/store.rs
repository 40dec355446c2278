//! The `ContentStore` trait.
//!
//! Implemented by storage backends (`MemoryStore`, `postwright-store-file`,
//! `postwright-store-sqlite`). Callers normally go through
//! [`crate::library::Library`], which masks backend failures.

use std::future::Future;

use crate::record::{
  ContentRecord, NewRecord, RecordPatch, new_record_id, now_millis,
};

/// Abstraction over a content library backend.
///
/// The store holds an unordered collection. It does not check id uniqueness
/// on [`create`](Self::create); callers supplying their own ids must make them
/// collision-free, or use
/// [`create_with_generated_id`](Self::create_with_generated_id).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored record, in no guaranteed order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<ContentRecord>, Self::Error>> + Send + '_;

  /// Append a fully-formed record.
  fn create(
    &self,
    record: ContentRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Merge `patch` into the record with `id`.
  ///
  /// Returns `false` (and changes nothing) if no record matches.
  fn update<'a>(
    &'a self,
    id: &'a str,
    patch: RecordPatch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove the record with `id`. Returns `false` if no record matches.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Create a record whose id and creation time are assigned here.
  fn create_with_generated_id(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<ContentRecord, Self::Error>> + Send + '_ {
    async move {
      let record = input.into_record(new_record_id(), now_millis());
      self.create(record.clone()).await?;
      Ok(record)
    }
  }
}
