//! Handlers for `/events` endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/events`      | Store order |
//! | `POST`   | `/events`      | Body: the five fields; 400 if invalid, 201 on success |
//! | `GET`    | `/events/{id}` | 404 if not found |
//! | `PUT`    | `/events/{id}` | Whole-record replace; the path id wins |
//! | `DELETE` | `/events/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use eventdesk_core::{
  Error,
  record::{EventFields, Record, RecordId},
  store::RecordStore,
  validate::validate,
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /events`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Record>>, ApiError>
where
  S: RecordStore,
{
  let records = store.list().await.map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /events`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(fields): Json<EventFields>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  validate(&fields).into_result()?;
  let record = store.create(&fields).await.map_err(ApiError::store)?;
  debug!(id = %record.id, "created event");
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /events/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Record>, ApiError>
where
  S: RecordStore,
{
  let id = RecordId::parse(&id);
  let record = store
    .get(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or(Error::NotFound(id))?;
  Ok(Json(record))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// A replacement record. The body may repeat the id or omit it.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  #[serde(default)]
  pub id:     Option<RecordId>,
  #[serde(flatten)]
  pub fields: EventFields,
  #[serde(flatten)]
  pub extra:  Map<String, Value>,
}

/// `PUT /events/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Record>, ApiError>
where
  S: RecordStore,
{
  let id = RecordId::parse(&id);
  if body.id.as_ref().is_some_and(|body_id| body_id != &id) {
    debug!(%id, "body id differs from path id; using path id");
  }
  validate(&body.fields).into_result()?;

  let record = Record {
    id:     id.clone(),
    fields: body.fields,
    extra:  body.extra,
  };
  let updated = store
    .update(&id, &record)
    .await
    .map_err(ApiError::store)?
    .ok_or(Error::NotFound(id))?;
  Ok(Json(updated))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /events/{id}`. Responds with an empty object, like a JSON file
/// server.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let id = RecordId::parse(&id);
  if !store.delete(&id).await.map_err(ApiError::store)? {
    return Err(Error::NotFound(id).into());
  }
  debug!(%id, "deleted event");
  Ok(Json(json!({})))
}
