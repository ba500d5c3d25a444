//! In-process [`RecordStore`] backed by a `Vec` behind an async lock.
//!
//! Ids are assigned sequentially starting after the largest unsigned integer id
//! already present, the way a JSON file server numbers new resources.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
  Error, Result,
  record::{EventFields, Record, RecordId},
  store::RecordStore,
};

#[derive(Debug)]
struct Inner {
  /// `None` once `u64::MAX` has been handed out or seeded.
  next_id: Option<u64>,
  records: Vec<Record>,
}

impl Default for Inner {
  fn default() -> Self {
    Self {
      next_id: Some(1),
      records: Vec::new(),
    }
  }
}

/// Cheap to clone: clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store pre-populated with `records`, kept in the given order.
  pub fn with_records(records: Vec<Record>) -> Self {
    let max_id = records
      .iter()
      .filter_map(|r| r.id.as_u64())
      .max()
      .unwrap_or(0);
    Self {
      inner: Arc::new(RwLock::new(Inner {
        next_id: max_id.checked_add(1),
        records,
      })),
    }
  }

  /// A store seeded from a JSON array of records.
  pub fn from_json(raw: &str) -> Result<Self> {
    let records: Vec<Record> = serde_json::from_str(raw)?;
    Ok(Self::with_records(records))
  }

  pub async fn len(&self) -> usize { self.inner.read().await.records.len() }

  pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

impl RecordStore for MemoryStore {
  type Error = crate::Error;

  async fn list(&self) -> Result<Vec<Record>> {
    Ok(self.inner.read().await.records.clone())
  }

  async fn create(&self, fields: &EventFields) -> Result<Record> {
    let mut inner = self.inner.write().await;
    let id = inner.next_id.ok_or(Error::IdsExhausted)?;
    inner.next_id = id.checked_add(1);
    let record = Record::new(id, fields.clone());
    inner.records.push(record.clone());
    Ok(record)
  }

  async fn get(&self, id: &RecordId) -> Result<Option<Record>> {
    let inner = self.inner.read().await;
    Ok(inner.records.iter().find(|r| &r.id == id).cloned())
  }

  async fn update(&self, id: &RecordId, record: &Record) -> Result<Option<Record>> {
    let mut inner = self.inner.write().await;
    let Some(slot) = inner.records.iter_mut().find(|r| &r.id == id) else {
      return Ok(None);
    };
    // The path id wins over whatever id the body carried.
    *slot = Record {
      id:     id.clone(),
      fields: record.fields.clone(),
      extra:  record.extra.clone(),
    };
    Ok(Some(slot.clone()))
  }

  async fn delete(&self, id: &RecordId) -> Result<bool> {
    let mut inner = self.inner.write().await;
    match inner.records.iter().position(|r| &r.id == id) {
      Some(i) => {
        inner.records.remove(i);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
