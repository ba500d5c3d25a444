//! Lister: the collection screen.

use std::fmt::Display;

use tracing::{debug, warn};

use super::{ViewLifetime, msg};
use crate::{
  order::sort_by_company,
  record::{Record, RecordId},
  state::OpState,
  store::RecordStore,
};

/// State of the list screen.
///
/// The records are a disposable cache of the store: they are replaced
/// wholesale on every load and only ever shrink in place, by one entry, when
/// a delete is confirmed.
#[derive(Debug, Default)]
pub struct Lister {
  records:        Vec<Record>,
  load:           OpState,
  delete:         OpState,
  pending_delete: Option<RecordId>,
  lifetime:       ViewLifetime,
}

impl Lister {
  pub fn new() -> Self { Self::default() }

  pub fn records(&self) -> &[Record] { &self.records }

  pub fn load_state(&self) -> &OpState { &self.load }

  pub fn delete_state(&self) -> &OpState { &self.delete }

  /// The id whose delete is outstanding, if any.
  pub fn pending_delete(&self) -> Option<&RecordId> { self.pending_delete.as_ref() }

  pub fn lifetime(&self) -> &ViewLifetime { &self.lifetime }

  // ── Load ──────────────────────────────────────────────────────────────────

  /// Start a fetch of the whole collection. Clears the current list so no
  /// stale data is shown. Returns `false` if a fetch is already outstanding.
  pub fn begin_load(&mut self) -> bool {
    if !self.load.begin() {
      return false;
    }
    self.records.clear();
    true
  }

  pub fn finish_load<E: Display>(&mut self, result: Result<Vec<Record>, E>) {
    match result {
      Ok(mut records) => {
        sort_by_company(&mut records);
        debug!(count = records.len(), "listed events");
        self.records = records;
        self.load.succeed();
      }
      Err(e) => {
        warn!(error = %e, "listing events failed");
        self.records.clear();
        self.load.fail(msg::FETCH_FAILED);
      }
    }
  }

  /// Fetch and sort the collection inline.
  pub async fn refresh<S: RecordStore>(&mut self, store: &S) {
    if !self.begin_load() {
      return;
    }
    let result = store.list().await;
    self.finish_load(result);
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// Start deleting `id`. Returns `false` if `id` is not in the list or a
  /// delete is already outstanding. The entry stays listed until the store
  /// confirms.
  pub fn begin_delete(&mut self, id: &RecordId) -> bool {
    if !self.records.iter().any(|r| &r.id == id) {
      return false;
    }
    if !self.delete.begin() {
      return false;
    }
    self.pending_delete = Some(id.clone());
    true
  }

  /// Reconcile a delete outcome. On success exactly the matching entry is
  /// removed, without a refetch; otherwise the list is left unchanged.
  pub fn finish_delete<E: Display>(&mut self, id: &RecordId, result: Result<bool, E>) {
    if self.pending_delete.as_ref() != Some(id) {
      debug!(%id, "ignoring outcome for a delete that is not pending");
      return;
    }
    self.pending_delete = None;

    match result {
      Ok(true) => {
        if let Some(i) = self.records.iter().position(|r| &r.id == id) {
          self.records.remove(i);
        }
        debug!(%id, "deleted event");
        self.delete.succeed();
      }
      Ok(false) => {
        warn!(%id, "delete target not found in store");
        self.delete.fail(msg::DELETE_FAILED);
      }
      Err(e) => {
        warn!(%id, error = %e, "deleting event failed");
        self.delete.fail(msg::DELETE_FAILED);
      }
    }
  }

  /// Delete `id` inline.
  pub async fn delete<S: RecordStore>(&mut self, store: &S, id: &RecordId) {
    if !self.begin_delete(id) {
      return;
    }
    let result = store.delete(id).await;
    self.finish_delete(id, result);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    record::EventFields,
    view::testing::{CountingStore, FailingStore, Unavailable, valid_fields},
  };

  fn rec(id: u64, company: &str) -> Record { Record::new(id, valid_fields(company)) }

  fn companies(lister: &Lister) -> Vec<&str> {
    lister
      .records()
      .iter()
      .map(|r| r.fields.company.as_str())
      .collect()
  }

  #[tokio::test]
  async fn refresh_sorts_by_company() {
    let store = CountingStore::with_records(vec![rec(1, "Zeta"), rec(2, "Acme")]);
    let mut lister = Lister::new();
    lister.refresh(&store).await;

    assert!(lister.load_state().is_succeeded());
    assert_eq!(companies(&lister), ["Acme", "Zeta"]);
  }

  #[tokio::test]
  async fn refresh_failure_shows_no_data() {
    let mut lister = Lister::new();
    lister.finish_load::<Unavailable>(Ok(vec![rec(1, "Acme")]));
    assert_eq!(lister.records().len(), 1);

    lister.refresh(&FailingStore).await;
    assert_eq!(lister.load_state().error(), Some(msg::FETCH_FAILED));
    assert!(lister.records().is_empty());
  }

  #[test]
  fn begin_load_clears_and_refuses_duplicates() {
    let mut lister = Lister::new();
    lister.finish_load::<Unavailable>(Ok(vec![rec(1, "Acme")]));
    assert!(lister.begin_load());
    assert!(lister.records().is_empty());
    assert!(!lister.begin_load());
  }

  #[tokio::test]
  async fn delete_removes_exactly_one_entry_without_refetch() {
    let store = CountingStore::with_records(vec![
      rec(3, "Gamma"),
      rec(5, "Beta"),
      rec(7, "Alpha"),
    ]);
    let mut lister = Lister::new();
    lister.refresh(&store).await;
    assert_eq!(store.calls(), 1);

    lister.delete(&store, &RecordId::from(5_u64)).await;

    assert_eq!(store.calls(), 2, "one delete call, no list call");
    assert!(lister.delete_state().is_succeeded());
    assert_eq!(companies(&lister), ["Alpha", "Gamma"]);
    assert_eq!(store.inner.len().await, 2);
  }

  #[tokio::test]
  async fn delete_failure_leaves_list_unchanged() {
    let mut lister = Lister::new();
    lister.finish_load::<Unavailable>(Ok(vec![rec(1, "Acme"), rec(2, "Beta")]));

    lister.delete(&FailingStore, &RecordId::from(1_u64)).await;

    assert_eq!(lister.delete_state().error(), Some(msg::DELETE_FAILED));
    assert_eq!(companies(&lister), ["Acme", "Beta"]);
    assert!(lister.pending_delete().is_none());
  }

  #[test]
  fn entry_stays_listed_until_delete_confirmed() {
    let mut lister = Lister::new();
    lister.finish_load::<Unavailable>(Ok(vec![rec(1, "Acme")]));
    let id = RecordId::from(1_u64);

    assert!(lister.begin_delete(&id));
    assert_eq!(lister.records().len(), 1);
    assert!(!lister.begin_delete(&id), "second delete while in flight");

    lister.finish_delete::<Unavailable>(&id, Ok(true));
    assert!(lister.records().is_empty());
  }

  #[test]
  fn delete_of_unknown_id_is_refused() {
    let mut lister = Lister::new();
    lister.finish_load::<Unavailable>(Ok(vec![rec(1, "Acme")]));
    assert!(!lister.begin_delete(&RecordId::from(9_u64)));
    assert_eq!(lister.delete_state(), &OpState::Idle);
  }

  #[test]
  fn stale_delete_outcome_is_ignored() {
    let mut lister = Lister::new();
    lister.finish_load::<Unavailable>(Ok(vec![rec(1, "Acme"), rec(2, "Beta")]));
    assert!(lister.begin_delete(&RecordId::from(1_u64)));

    lister.finish_delete::<Unavailable>(&RecordId::from(2_u64), Ok(true));
    assert_eq!(lister.records().len(), 2);
    assert!(lister.delete_state().is_in_flight());
  }

  #[tokio::test]
  async fn sparse_records_are_still_listed() {
    let mut lister = Lister::new();
    let sparse = Record::new(1_u64, EventFields {
      company: "Acme".into(),
      ..EventFields::default()
    });
    lister.finish_load::<Unavailable>(Ok(vec![sparse]));
    assert_eq!(lister.records().len(), 1);
  }
}
