//! Editor: the edit form for one existing record.

use std::fmt::Display;

use tracing::{debug, warn};

use super::{Transition, ViewLifetime, msg};
use crate::{
  Error, Result,
  record::{EventFields, Field, Record, RecordId},
  state::OpState,
  store::RecordStore,
  validate::{ValidationReport, validate},
};

/// State of the edit screen for the record `id`.
///
/// The fetched record is kept alongside the form so that fields the form
/// does not show are sent back unchanged on update.
#[derive(Debug)]
pub struct Editor {
  id:       RecordId,
  fields:   EventFields,
  loaded:   Option<Record>,
  load:     OpState,
  submit:   OpState,
  lifetime: ViewLifetime,
}

impl Editor {
  pub fn new(id: RecordId) -> Self {
    Self {
      id,
      fields: EventFields::default(),
      loaded: None,
      load: OpState::default(),
      submit: OpState::default(),
      lifetime: ViewLifetime::new(),
    }
  }

  pub fn id(&self) -> &RecordId { &self.id }

  pub fn fields(&self) -> &EventFields { &self.fields }

  /// The record as last fetched from the store.
  pub fn loaded(&self) -> Option<&Record> { self.loaded.as_ref() }

  pub fn load_state(&self) -> &OpState { &self.load }

  pub fn submit_state(&self) -> &OpState { &self.submit }

  pub fn lifetime(&self) -> &ViewLifetime { &self.lifetime }

  pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
    *self.fields.get_mut(field) = value.into();
  }

  pub fn field_mut(&mut self, field: Field) -> &mut String { self.fields.get_mut(field) }

  pub fn report(&self) -> ValidationReport { validate(&self.fields) }

  // ── Read-one ──────────────────────────────────────────────────────────────

  /// Start fetching the record. Resets the form to empty defaults until the
  /// response arrives.
  pub fn begin_load(&mut self) -> bool {
    if !self.load.begin() {
      return false;
    }
    self.fields = EventFields::default();
    self.loaded = None;
    true
  }

  /// Populate the form from the fetched record, or leave it at defaults on
  /// any failure. The form is never partially populated.
  pub fn finish_load<E: Display>(&mut self, result: Result<Option<Record>, E>) {
    match result {
      Ok(Some(record)) => {
        debug!(id = %self.id, "loaded event");
        self.fields = record.fields.clone();
        self.loaded = Some(record);
        self.load.succeed();
      }
      Ok(None) => {
        warn!(id = %self.id, "event not found");
        self.load.fail(msg::FETCH_FAILED);
      }
      Err(e) => {
        warn!(id = %self.id, error = %e, "fetching event failed");
        self.load.fail(msg::FETCH_FAILED);
      }
    }
  }

  pub async fn load<S: RecordStore>(&mut self, store: &S) {
    if !self.begin_load() {
      return;
    }
    let result = store.get(&self.id).await;
    self.finish_load(result);
  }

  // ── Update ────────────────────────────────────────────────────────────────

  /// Validate and build the replacement record: the fetched record with the
  /// five editable fields swapped for the form's values.
  pub fn begin_submit(&mut self) -> Result<Record> {
    let Some(loaded) = &self.loaded else {
      return Err(Error::NotLoaded(self.id.clone()));
    };
    validate(&self.fields).into_result()?;
    let mut body = loaded.with_fields(self.fields.clone());
    body.id = self.id.clone();
    if !self.submit.begin() {
      return Err(Error::InFlight);
    }
    Ok(body)
  }

  /// Reconcile an update outcome. The form keeps the user's edits either way.
  pub fn finish_submit<E: Display>(&mut self, result: Result<Option<Record>, E>) -> Transition {
    match result {
      Ok(Some(record)) => {
        debug!(id = %self.id, "updated event");
        self.loaded = Some(record);
        self.submit.succeed();
        Transition::ToList
      }
      Ok(None) => {
        warn!(id = %self.id, "update target not found in store");
        self.submit.fail(msg::UPDATE_FAILED);
        Transition::Stay
      }
      Err(e) => {
        warn!(id = %self.id, error = %e, "updating event failed");
        self.submit.fail(msg::UPDATE_FAILED);
        Transition::Stay
      }
    }
  }

  /// Validate and replace the remote record inline.
  pub async fn update<S: RecordStore>(&mut self, store: &S) -> Result<Transition> {
    let body = self.begin_submit()?;
    let result = store.update(&self.id, &body).await;
    Ok(self.finish_submit(result))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::view::testing::{CountingStore, FailingStore, Unavailable, valid_fields};

  fn stored_record() -> Record {
    let mut rec = Record::new(5_u64, valid_fields("Acme"));
    rec.extra.insert("createdOn".into(), json!("2023-01-01"));
    rec.extra.insert("isActive".into(), json!(true));
    rec
  }

  #[tokio::test]
  async fn load_populates_form() {
    let store = CountingStore::with_records(vec![stored_record()]);
    let mut editor = Editor::new(RecordId::from(5_u64));
    editor.load(&store).await;

    assert!(editor.load_state().is_succeeded());
    assert_eq!(editor.fields(), &valid_fields("Acme"));
  }

  #[tokio::test]
  async fn load_of_missing_record_leaves_defaults() {
    let store = CountingStore::with_records(vec![stored_record()]);
    let mut editor = Editor::new(RecordId::from(404_u64));
    editor.load(&store).await;

    assert_eq!(editor.load_state().error(), Some(msg::FETCH_FAILED));
    assert_eq!(editor.fields(), &EventFields::default());
    assert!(editor.loaded().is_none());
  }

  #[tokio::test]
  async fn load_transport_failure_leaves_defaults() {
    let mut editor = Editor::new(RecordId::from(5_u64));
    editor.load(&FailingStore).await;
    assert_eq!(editor.load_state().error(), Some(msg::FETCH_FAILED));
    assert_eq!(editor.fields(), &EventFields::default());
  }

  #[tokio::test]
  async fn update_replaces_editable_fields_and_keeps_passthrough() {
    let store = CountingStore::with_records(vec![stored_record()]);
    let mut editor = Editor::new(RecordId::from(5_u64));
    editor.load(&store).await;

    editor.set_field(Field::Name, "Renamed");
    editor.set_field(Field::Description, "New text");
    editor.set_field(Field::Company, "Beta");
    editor.set_field(Field::Color, "blue");
    editor.set_field(Field::Email, "x@y.org");

    assert_eq!(editor.update(&store).await.unwrap(), Transition::ToList);

    let saved = store.inner.get(&RecordId::from(5_u64)).await.unwrap().unwrap();
    assert_eq!(saved.fields, EventFields {
      name:        "Renamed".into(),
      description: "New text".into(),
      company:     "Beta".into(),
      color:       "blue".into(),
      email:       "x@y.org".into(),
    });
    assert_eq!(saved.extra["createdOn"], json!("2023-01-01"));
    assert_eq!(saved.extra["isActive"], json!(true));
  }

  #[tokio::test]
  async fn invalid_edit_never_reaches_store() {
    let store = CountingStore::with_records(vec![stored_record()]);
    let mut editor = Editor::new(RecordId::from(5_u64));
    editor.load(&store).await;
    editor.set_field(Field::Company, "AB");

    assert!(matches!(editor.update(&store).await, Err(Error::Validation(_))));
    assert_eq!(store.calls(), 1, "only the initial read");
  }

  #[tokio::test]
  async fn update_failure_keeps_edits() {
    let mut editor = Editor::new(RecordId::from(5_u64));
    editor.finish_load::<Unavailable>(Ok(Some(stored_record())));
    editor.set_field(Field::Color, "green");

    assert_eq!(editor.update(&FailingStore).await.unwrap(), Transition::Stay);
    assert_eq!(editor.submit_state().error(), Some(msg::UPDATE_FAILED));
    assert_eq!(editor.fields().color, "green");
  }

  #[test]
  fn submit_before_load_is_refused() {
    let mut editor = Editor::new(RecordId::from(5_u64));
    for field in Field::ALL {
      editor.set_field(field, valid_fields("Acme").get(field));
    }
    assert!(matches!(editor.begin_submit(), Err(Error::NotLoaded(_))));
    assert_eq!(editor.submit_state(), &OpState::Idle);
  }

  #[test]
  fn update_body_is_the_whole_record() {
    let mut editor = Editor::new(RecordId::from(5_u64));
    editor.finish_load::<Unavailable>(Ok(Some(stored_record())));
    editor.set_field(Field::Name, "Renamed");

    let body = serde_json::to_value(editor.begin_submit().unwrap()).unwrap();
    assert_eq!(body["id"], json!(5));
    assert_eq!(body["name"], json!("Renamed"));
    assert_eq!(body["company"], json!("Acme"));
    assert_eq!(body["createdOn"], json!("2023-01-01"));
  }
}
