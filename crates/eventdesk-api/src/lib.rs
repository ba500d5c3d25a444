//! JSON REST API for an events collection.
//!
//! Exposes an axum [`Router`] backed by any
//! [`eventdesk_core::store::RecordStore`], speaking the same wire format the
//! `eventdesk` client expects. The `eventdesk-server` binary mounts it over an
//! in-memory store for local development.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(eventdesk_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod events;

use std::sync::Arc;

use axum::{Router, routing::get};
use eventdesk_core::store::RecordStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route(
      "/events/{id}",
      get(events::get_one::<S>)
        .put(events::update::<S>)
        .delete(events::delete::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}
