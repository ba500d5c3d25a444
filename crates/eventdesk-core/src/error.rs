//! Error types for `eventdesk-core`.

use thiserror::Error;

use crate::{record::RecordId, validate::ValidationReport};

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(ValidationReport),

  #[error("an operation is already in flight")]
  InFlight,

  #[error("record {0} has not been loaded")]
  NotLoaded(RecordId),

  #[error("record not found: {0}")]
  NotFound(RecordId),

  #[error("no numeric ids left to assign")]
  IdsExhausted,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
