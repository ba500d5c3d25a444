//! Creator: the new-record form.

use std::fmt::Display;

use tracing::{debug, warn};

use super::{Transition, ViewLifetime, msg};
use crate::{
  Error, Result,
  record::{EventFields, Field, Record},
  state::OpState,
  store::RecordStore,
  validate::{ValidationReport, validate},
};

#[derive(Debug, Default)]
pub struct Creator {
  fields:   EventFields,
  submit:   OpState,
  lifetime: ViewLifetime,
}

impl Creator {
  pub fn new() -> Self { Self::default() }

  pub fn fields(&self) -> &EventFields { &self.fields }

  pub fn submit_state(&self) -> &OpState { &self.submit }

  pub fn lifetime(&self) -> &ViewLifetime { &self.lifetime }

  pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
    *self.fields.get_mut(field) = value.into();
  }

  pub fn field_mut(&mut self, field: Field) -> &mut String { self.fields.get_mut(field) }

  /// Current per-field validity.
  pub fn report(&self) -> ValidationReport { validate(&self.fields) }

  /// Validate and, if every field passes and nothing is outstanding, move to
  /// `InFlight` and return the body to send.
  pub fn begin_submit(&mut self) -> Result<EventFields> {
    self.report().into_result()?;
    if !self.submit.begin() {
      return Err(Error::InFlight);
    }
    Ok(self.fields.clone())
  }

  /// Reconcile a create outcome. Success resets the form to empty defaults;
  /// failure keeps what the user typed for a retry.
  pub fn finish_submit<E: Display>(&mut self, result: Result<Record, E>) -> Transition {
    match result {
      Ok(record) => {
        debug!(id = %record.id, "created event");
        self.fields = EventFields::default();
        self.submit.succeed();
        Transition::ToList
      }
      Err(e) => {
        warn!(error = %e, "creating event failed");
        self.submit.fail(msg::SUBMIT_FAILED);
        Transition::Stay
      }
    }
  }

  /// Validate and submit inline. An invalid form returns
  /// [`Error::Validation`] without touching the store.
  pub async fn create<S: RecordStore>(&mut self, store: &S) -> Result<Transition> {
    let draft = self.begin_submit()?;
    let result = store.create(&draft).await;
    Ok(self.finish_submit(result))
  }
}
