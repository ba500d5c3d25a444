//! Core types and controllers for the eventdesk record client.
//!
//! Nothing here speaks HTTP or draws to a terminal. The remote store is
//! reached only through the [`store::RecordStore`] trait; the CLI implements
//! it over HTTP, and [`memory::MemoryStore`] implements it in process for the
//! development server and for tests.

pub mod error;
pub mod memory;
pub mod order;
pub mod record;
pub mod state;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{Error, Result};
