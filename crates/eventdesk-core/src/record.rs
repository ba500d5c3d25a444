//! Record: the single entity mirrored from the remote store.
//!
//! A record carries five user-editable fields plus whatever else the store
//! returns. The extra fields are kept verbatim so they survive a read-one →
//! update round trip unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Store-assigned identifier.
///
/// The store may use JSON numbers (of any sign or precision) or strings; the
/// original representation is kept so it is re-sent exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
  Number(Number),
  Text(String),
}

impl RecordId {
  /// Interpret a URL path segment. A segment that is the canonical text of a
  /// JSON number becomes a numeric id; anything else (`007`, `1e3`) stays
  /// text.
  pub fn parse(segment: &str) -> Self {
    match segment.parse::<Number>() {
      Ok(n) if n.to_string() == segment => Self::Number(n),
      _ => Self::Text(segment.to_owned()),
    }
  }

  /// The id as an unsigned integer, if it is one.
  pub fn as_u64(&self) -> Option<u64> {
    match self {
      Self::Number(n) => n.as_u64(),
      Self::Text(_) => None,
    }
  }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Number(n) => write!(f, "{n}"),
      Self::Text(s) => f.write_str(s),
    }
  }
}

impl From<u64> for RecordId {
  fn from(n: u64) -> Self { Self::Number(n.into()) }
}

impl From<&str> for RecordId {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

// ─── Editable fields ─────────────────────────────────────────────────────────

/// One of the five user-editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  Name,
  Description,
  Company,
  Color,
  Email,
}

impl Field {
  /// Form order.
  pub const ALL: [Field; 5] = [
    Field::Name,
    Field::Description,
    Field::Company,
    Field::Color,
    Field::Email,
  ];

  /// Human-readable label, used in validation messages and form rendering.
  pub fn label(self) -> &'static str {
    match self {
      Field::Name => "Name",
      Field::Description => "Description",
      Field::Company => "Company",
      Field::Color => "Color",
      Field::Email => "Email",
    }
  }

  /// The JSON key used by the store.
  pub fn key(self) -> &'static str {
    match self {
      Field::Name => "name",
      Field::Description => "description",
      Field::Company => "company",
      Field::Color => "color",
      Field::Email => "email",
    }
  }

  pub fn next(self) -> Field {
    let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
    Self::ALL[(i + 1) % Self::ALL.len()]
  }

  pub fn prev(self) -> Field {
    let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
    Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

/// The editable part of a record. `Default` is the empty form.
///
/// This is also the body of a create request, which is why it has no `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFields {
  #[serde(default)]
  pub name:        String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub company:     String,
  #[serde(default)]
  pub color:       String,
  #[serde(default)]
  pub email:       String,
}

impl EventFields {
  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Description => &self.description,
      Field::Company => &self.company,
      Field::Color => &self.color,
      Field::Email => &self.email,
    }
  }

  pub fn get_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::Name => &mut self.name,
      Field::Description => &mut self.description,
      Field::Company => &mut self.company,
      Field::Color => &mut self.color,
      Field::Email => &mut self.email,
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Display-only keys returned by the store, in the order they are shown.
pub const PASSTHROUGH_KEYS: [&str; 7] =
  ["phone", "address", "isActive", "date", "time", "image", "createdOn"];

/// A record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub id:     RecordId,
  #[serde(flatten)]
  pub fields: EventFields,
  /// Every other key the store returned (`phone`, `createdOn`, …).
  #[serde(flatten)]
  pub extra:  Map<String, Value>,
}

impl Record {
  pub fn new(id: impl Into<RecordId>, fields: EventFields) -> Self {
    Self {
      id: id.into(),
      fields,
      extra: Map::new(),
    }
  }

  /// A copy of this record with the editable fields replaced and every
  /// passthrough field left as it was.
  pub fn with_fields(&self, fields: EventFields) -> Self {
    Self {
      id: self.id.clone(),
      fields,
      extra: self.extra.clone(),
    }
  }

  /// Passthrough fields rendered as text: known keys first, then any others
  /// by key.
  pub fn display_extra(&self) -> Vec<(&str, String)> {
    let known = PASSTHROUGH_KEYS
      .iter()
      .filter_map(|k| self.extra.get_key_value(*k));
    let others = self
      .extra
      .iter()
      .filter(|(k, _)| !PASSTHROUGH_KEYS.contains(&k.as_str()));
    known
      .chain(others)
      .map(|(k, v)| {
        let text = match v {
          Value::String(s) => s.clone(),
          Value::Null => String::new(),
          other => other.to_string(),
        };
        (k.as_str(), text)
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn deserialize_keeps_unknown_fields_in_extra() {
    let rec: Record = serde_json::from_value(json!({
      "id": 7,
      "name": "Launch",
      "description": "Product launch",
      "company": "Acme",
      "color": "red",
      "email": "a@b.co",
      "phone": "555-0100",
      "isActive": true,
      "createdOn": "2023-01-01"
    }))
    .unwrap();

    assert_eq!(rec.id, RecordId::from(7_u64));
    assert_eq!(rec.fields.company, "Acme");
    assert_eq!(rec.extra.len(), 3);
    assert_eq!(rec.extra["isActive"], json!(true));
    assert!(!rec.extra.contains_key("name"));
    assert!(!rec.extra.contains_key("id"));
  }

  #[test]
  fn missing_editable_fields_default_to_empty() {
    let rec: Record =
      serde_json::from_value(json!({ "id": "abc", "company": "Zeta" })).unwrap();
    assert_eq!(rec.id, RecordId::Text("abc".into()));
    assert_eq!(rec.fields.company, "Zeta");
    assert_eq!(rec.fields.name, "");
  }

  #[test]
  fn with_fields_preserves_passthrough() {
    let rec: Record = serde_json::from_value(json!({
      "id": 1,
      "name": "Old",
      "createdOn": "2023-01-01"
    }))
    .unwrap();

    let edited = rec.with_fields(EventFields {
      name: "New name".into(),
      ..EventFields::default()
    });

    let body = serde_json::to_value(&edited).unwrap();
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["name"], json!("New name"));
    assert_eq!(body["createdOn"], json!("2023-01-01"));
  }

  #[test]
  fn create_body_has_no_id() {
    let body = serde_json::to_value(EventFields::default()).unwrap();
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 5);
    assert!(!obj.contains_key("id"));
  }

  #[test]
  fn record_id_parse_and_display() {
    assert_eq!(RecordId::parse("5"), RecordId::from(5_u64));
    assert_eq!(RecordId::parse("x9"), RecordId::Text("x9".into()));
    assert_eq!(RecordId::parse("-3").to_string(), "-3");
    assert_eq!(RecordId::parse("007"), RecordId::Text("007".into()));
    assert_eq!(RecordId::from(5_u64).to_string(), "5");
  }

  #[test]
  fn negative_and_fractional_ids_round_trip() {
    let records: Vec<Record> = serde_json::from_value(json!([
      { "id": -3, "company": "Acme" },
      { "id": 1.5, "company": "Beta" },
      { "id": 18446744073709551615_u64, "company": "Gamma" }
    ]))
    .unwrap();

    assert_eq!(records[0].id.to_string(), "-3");
    assert_eq!(records[1].id.to_string(), "1.5");
    assert_eq!(records[2].id.as_u64(), Some(u64::MAX));
    assert_eq!(RecordId::parse("1.5"), records[1].id);

    let body = serde_json::to_value(&records).unwrap();
    assert_eq!(body[0]["id"], json!(-3));
    assert_eq!(body[1]["id"], json!(1.5));
  }

  #[test]
  fn display_extra_orders_known_keys_first() {
    let rec: Record = serde_json::from_value(json!({
      "id": 1,
      "zzz": "last",
      "createdOn": "2023-01-01",
      "phone": "555"
    }))
    .unwrap();
    let keys: Vec<_> = rec.display_extra().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["phone", "createdOn", "zzz"]);
  }

  #[test]
  fn field_cycle_wraps() {
    assert_eq!(Field::Email.next(), Field::Name);
    assert_eq!(Field::Name.prev(), Field::Email);
  }
}
