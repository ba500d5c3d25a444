//! Lister, Creator and Editor: the three view controllers.
//!
//! Each controller owns the state of one screen for as long as that screen is
//! shown, and turns one user action into exactly one [`RecordStore`] call.
//! Every operation is split into `begin_*` (local checks, state →
//! `InFlight`) and `finish_*` (reconcile with the outcome), so a UI can spawn
//! the remote call and hand the result back later. The `async` convenience
//! methods do both halves inline.
//!
//! Failures are logged with full detail and exposed to the user only as the
//! per-category message in [`msg`].
//!
//! [`RecordStore`]: crate::store::RecordStore

mod creator;
mod editor;
mod lister;

#[cfg(test)]
mod testing;

use std::future::Future;

use tokio_util::sync::CancellationToken;

pub use creator::Creator;
pub use editor::Editor;
pub use lister::Lister;

/// User-facing texts, one per outcome category.
pub mod msg {
  pub const FETCHING: &str = "Fetching ...";
  pub const FETCH_FAILED: &str = "Failed to fetch data. Please try again later.";
  pub const SUBMIT_FAILED: &str = "Failed to submit the data. Please try again later.";
  pub const UPDATE_FAILED: &str = "Failed to update the data. Please try again later.";
  pub const DELETE_FAILED: &str = "Failed to delete data. Please try again later.";
  pub const SUBMITTED: &str = "Data submitted successfully!";
  pub const UPDATED: &str = "Data updated successfully!";
}

// ─── Navigation ──────────────────────────────────────────────────────────────

/// What the caller should do after an operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
  /// Remain on the current screen.
  Stay,
  /// Go back to the list screen (which refetches).
  ToList,
}

// ─── View lifetime ───────────────────────────────────────────────────────────

/// Cancellation scope tied to one controller.
///
/// Ends when [`end`](Self::end) is called or the controller is dropped.
/// Requests started through [`guard`](Self::guard) resolve to `None` once the
/// view has ended, so a late response never reaches a torn-down screen.
#[derive(Debug, Default)]
pub struct ViewLifetime {
  token: CancellationToken,
}

impl ViewLifetime {
  pub fn new() -> Self { Self::default() }

  pub fn end(&self) { self.token.cancel(); }

  pub fn is_ended(&self) -> bool { self.token.is_cancelled() }

  /// Wrap `fut` so it is abandoned when this view ends. The returned future
  /// owns its own handle to the scope and can be spawned.
  pub fn guard<F>(&self, fut: F) -> impl Future<Output = Option<F::Output>> + Send + 'static
  where
    F: Future + Send + 'static,
    F::Output: Send,
  {
    let token = self.token.clone();
    async move {
      tokio::select! {
        biased;
        _ = token.cancelled() => None,
        out = fut => Some(out),
      }
    }
  }
}

impl Drop for ViewLifetime {
  fn drop(&mut self) { self.token.cancel(); }
}
