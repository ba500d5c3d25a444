//! Store doubles shared by the controller tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::{
  memory::MemoryStore,
  record::{EventFields, Record, RecordId},
  store::RecordStore,
};

pub fn valid_fields(company: &str) -> EventFields {
  EventFields {
    name:        "Launch".into(),
    description: "Product launch".into(),
    company:     company.into(),
    color:       "red".into(),
    email:       "a@b.co".into(),
  }
}

#[derive(Debug, Error)]
#[error("store unavailable")]
pub struct Unavailable;

/// Every call fails.
pub struct FailingStore;

impl RecordStore for FailingStore {
  type Error = Unavailable;

  async fn list(&self) -> Result<Vec<Record>, Unavailable> { Err(Unavailable) }

  async fn create(&self, _: &EventFields) -> Result<Record, Unavailable> {
    Err(Unavailable)
  }

  async fn get(&self, _: &RecordId) -> Result<Option<Record>, Unavailable> {
    Err(Unavailable)
  }

  async fn update(&self, _: &RecordId, _: &Record) -> Result<Option<Record>, Unavailable> {
    Err(Unavailable)
  }

  async fn delete(&self, _: &RecordId) -> Result<bool, Unavailable> { Err(Unavailable) }
}

/// A [`MemoryStore`] that counts every call made against it.
#[derive(Default)]
pub struct CountingStore {
  pub inner: MemoryStore,
  calls:     AtomicUsize,
}

impl CountingStore {
  pub fn with_records(records: Vec<Record>) -> Self {
    Self {
      inner: MemoryStore::with_records(records),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

  fn tick(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }
}

impl RecordStore for CountingStore {
  type Error = crate::Error;

  async fn list(&self) -> crate::Result<Vec<Record>> {
    self.tick();
    self.inner.list().await
  }

  async fn create(&self, fields: &EventFields) -> crate::Result<Record> {
    self.tick();
    self.inner.create(fields).await
  }

  async fn get(&self, id: &RecordId) -> crate::Result<Option<Record>> {
    self.tick();
    self.inner.get(id).await
  }

  async fn update(&self, id: &RecordId, record: &Record) -> crate::Result<Option<Record>> {
    self.tick();
    self.inner.update(id, record).await
  }

  async fn delete(&self, id: &RecordId) -> crate::Result<bool> {
    self.tick();
    self.inner.delete(id).await
  }
}
