//! Field-level validation for the record form.
//!
//! Validation is a pure function of the current field values. It never
//! fails; it reports a pass/fail plus a message for each of the five fields.
//!
//! | Field | Rule |
//! |-------|------|
//! | name, description, company, color | non-empty, at least [`MIN_LEN`] characters |
//! | email | non-empty, matches [`EMAIL_PATTERN`] |

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::{
  Error,
  record::{EventFields, Field},
};

/// Minimum length, in characters, of every length-gated field.
pub const MIN_LEN: usize = 3;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

// ─── Per-field result ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidity {
  Valid,
  Invalid(String),
}

impl FieldValidity {
  pub fn is_valid(&self) -> bool { matches!(self, Self::Valid) }

  pub fn message(&self) -> Option<&str> {
    match self {
      Self::Valid => None,
      Self::Invalid(m) => Some(m),
    }
  }
}

/// Apply the rule for `field` to `value`.
pub fn validate_field(field: Field, value: &str) -> FieldValidity {
  let label = field.label();
  if value.is_empty() {
    return FieldValidity::Invalid(format!("{label} is required"));
  }
  match field {
    Field::Email => {
      if EMAIL_REGEX.is_match(value) {
        FieldValidity::Valid
      } else {
        FieldValidity::Invalid(format!("{label} must be a valid address"))
      }
    }
    _ => {
      if value.chars().count() >= MIN_LEN {
        FieldValidity::Valid
      } else {
        FieldValidity::Invalid(format!(
          "{label} must be at least {MIN_LEN} characters"
        ))
      }
    }
  }
}

// ─── Whole-form report ───────────────────────────────────────────────────────

/// Validity of all five fields, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
  entries: [(Field, FieldValidity); 5],
}

impl ValidationReport {
  /// `true` when every field passes; the form is submittable only then.
  pub fn is_valid(&self) -> bool {
    self.entries.iter().all(|(_, v)| v.is_valid())
  }

  pub fn get(&self, field: Field) -> &FieldValidity {
    // Entries are built from `Field::ALL`, so the lookup always hits.
    &self.entries[Field::ALL.iter().position(|f| *f == field).unwrap_or(0)].1
  }

  pub fn iter(&self) -> impl Iterator<Item = &(Field, FieldValidity)> {
    self.entries.iter()
  }

  /// Only the failing fields.
  pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> {
    self
      .entries
      .iter()
      .filter_map(|(f, v)| v.message().map(|m| (*f, m)))
  }

  pub fn into_result(self) -> crate::Result<()> {
    if self.is_valid() {
      Ok(())
    } else {
      Err(Error::Validation(self))
    }
  }
}

impl fmt::Display for ValidationReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let messages: Vec<&str> = self.errors().map(|(_, m)| m).collect();
    f.write_str(&messages.join("; "))
  }
}

/// Validate every field of `fields`.
pub fn validate(fields: &EventFields) -> ValidationReport {
  ValidationReport {
    entries: Field::ALL.map(|f| (f, validate_field(f, fields.get(f)))),
  }
}
