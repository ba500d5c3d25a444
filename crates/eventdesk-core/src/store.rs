//! The `RecordStore` trait: the only way the client reaches the remote
//! record collection.
//!
//! The CLI implements it over HTTP (`GET/POST /events`,
//! `GET/PUT/DELETE /events/{id}`); [`MemoryStore`](crate::memory::MemoryStore)
//! implements it in process. Controllers in [`view`](crate::view) depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{EventFields, Record, RecordId};

/// Abstraction over the remote record collection.
///
/// Every method is exactly one remote call with no retry. All methods return
/// `Send` futures so calls can be spawned onto a multi-threaded runtime.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the whole collection, in store order.
  fn list(&self) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Create a record from `fields`. The store assigns the id.
  fn create<'a>(
    &'a self,
    fields: &'a EventFields,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + 'a;

  /// Fetch one record. Returns `None` if the store has no such id.
  fn get<'a>(
    &'a self,
    id: &'a RecordId,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Replace the record at `id` wholesale with `record`. Returns `None` if
  /// the store has no such id.
  fn update<'a>(
    &'a self,
    id: &'a RecordId,
    record: &'a Record,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Delete the record at `id`. Returns `false` if the store has no such id.
  fn delete<'a>(
    &'a self,
    id: &'a RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
