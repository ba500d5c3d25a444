//! Application state machine and event dispatcher.
//!
//! The screen owns its controller; replacing the screen drops the controller
//! and with it the controller's [`ViewLifetime`], which abandons any request
//! that screen still had outstanding. Remote calls run on spawned tasks and
//! report back as [`Envelope`]s tagged with the generation of the screen
//! that started them.

use std::{future::Future, sync::Arc};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use eventdesk_core::{
  Error,
  record::{Field, Record, RecordId},
  store::RecordStore,
  view::{Creator, Editor, Lister, Transition, ViewLifetime, msg},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::client::{ApiClient, ClientError};

// ─── Screen ───────────────────────────────────────────────────────────────────

pub enum Screen {
  /// The collection, sorted by company.
  List(Lister),
  /// The new-record form.
  Create(Creator),
  /// The edit form for one record.
  Edit(Editor),
}

// ─── Outcomes ─────────────────────────────────────────────────────────────────

/// Result of one remote call, delivered back to the event loop.
#[derive(Debug)]
pub enum Outcome {
  Listed(Result<Vec<Record>, ClientError>),
  Deleted(RecordId, Result<bool, ClientError>),
  Created(Result<Record, ClientError>),
  Loaded(Result<Option<Record>, ClientError>),
  Updated(Result<Option<Record>, ClientError>),
}

#[derive(Debug)]
pub struct Envelope {
  generation: u64,
  outcome:    Outcome,
}

/// Spawn `fut`, abandoning it when `lifetime` ends.
fn dispatch<F>(
  tx: &UnboundedSender<Envelope>,
  generation: u64,
  lifetime: &ViewLifetime,
  fut: F,
) where
  F: Future<Output = Outcome> + Send + 'static,
{
  let guarded = lifetime.guard(fut);
  let tx = tx.clone();
  tokio::spawn(async move {
    if let Some(outcome) = guarded.await {
      // A closed receiver means the app is shutting down.
      let _ = tx.send(Envelope { generation, outcome });
    }
  });
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen and its controller.
  pub screen: Screen,

  /// Cursor position within the list.
  pub list_cursor: usize,

  /// Focused field on the form screens.
  pub focus: Field,

  /// One-line message carried across navigation (e.g. a success notice).
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,

  /// Bumped on every navigation; outcomes from older screens are dropped.
  generation: u64,

  tx: UnboundedSender<Envelope>,
}

impl App {
  /// Create an [`App`] on an empty list screen. Call [`open_list`](Self::open_list)
  /// to start the first fetch.
  pub fn new(client: ApiClient, tx: UnboundedSender<Envelope>) -> Self {
    Self {
      screen: Screen::List(Lister::new()),
      list_cursor: 0,
      focus: Field::Name,
      status_msg: String::new(),
      client: Arc::new(client),
      generation: 0,
      tx,
    }
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Enter the list screen. Always refetches; the previous list is discarded.
  pub fn open_list(&mut self) {
    self.generation += 1;
    self.status_msg.clear();
    self.list_cursor = 0;

    let mut lister = Lister::new();
    if lister.begin_load() {
      let client = self.client.clone();
      dispatch(&self.tx, self.generation, lister.lifetime(), async move {
        Outcome::Listed(client.list().await)
      });
    }
    self.screen = Screen::List(lister);
  }

  pub fn open_create(&mut self) {
    self.generation += 1;
    self.status_msg.clear();
    self.focus = Field::Name;
    self.screen = Screen::Create(Creator::new());
  }

  pub fn open_edit(&mut self, id: RecordId) {
    self.generation += 1;
    self.status_msg.clear();
    self.focus = Field::Name;

    let mut editor = Editor::new(id.clone());
    if editor.begin_load() {
      let client = self.client.clone();
      dispatch(&self.tx, self.generation, editor.lifetime(), async move {
        Outcome::Loaded(client.get(&id).await)
      });
    }
    self.screen = Screen::Edit(editor);
  }

  // ── Outcomes ──────────────────────────────────────────────────────────────

  /// Reconcile a finished remote call with the current screen.
  pub fn apply(&mut self, envelope: Envelope) {
    if envelope.generation != self.generation {
      debug!(
        generation = envelope.generation,
        current = self.generation,
        "dropping outcome for a closed screen"
      );
      return;
    }

    let mut notice = None;
    match (&mut self.screen, envelope.outcome) {
      (Screen::List(lister), Outcome::Listed(result)) => {
        lister.finish_load(result);
        let len = lister.records().len();
        self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
      }
      (Screen::List(lister), Outcome::Deleted(id, result)) => {
        lister.finish_delete(&id, result);
        let len = lister.records().len();
        self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
      }
      (Screen::Create(creator), Outcome::Created(result)) => {
        if creator.finish_submit(result) == Transition::ToList {
          notice = Some(msg::SUBMITTED);
        }
      }
      (Screen::Edit(editor), Outcome::Loaded(result)) => editor.finish_load(result),
      (Screen::Edit(editor), Outcome::Updated(result)) => {
        if editor.finish_submit(result) == Transition::ToList {
          notice = Some(msg::UPDATED);
        }
      }
      (_, outcome) => debug!(?outcome, "outcome does not match the current screen"),
    }

    if let Some(notice) = notice {
      self.open_list();
      self.status_msg = notice.into();
    }
  }

  // ── Derived display state ─────────────────────────────────────────────────

  /// The record under the list cursor, if any.
  pub fn cursor_record(&self) -> Option<&Record> {
    match &self.screen {
      Screen::List(lister) => lister.records().get(self.list_cursor),
      _ => None,
    }
  }

  /// Status text for the current screen and whether it reports a failure.
  pub fn status_line(&self) -> (String, bool) {
    let (busy, failure, busy_text) = match &self.screen {
      Screen::List(lister) => {
        let failure = lister
          .load_state()
          .error()
          .or_else(|| lister.delete_state().error());
        if lister.load_state().is_in_flight() {
          (true, failure, msg::FETCHING)
        } else {
          (lister.delete_state().is_in_flight(), failure, "Deleting…")
        }
      }
      Screen::Create(creator) => (
        creator.submit_state().is_in_flight(),
        creator.submit_state().error(),
        "Loading",
      ),
      Screen::Edit(editor) => {
        let failure = editor
          .load_state()
          .error()
          .or_else(|| editor.submit_state().error());
        if editor.load_state().is_in_flight() {
          (true, failure, msg::FETCHING)
        } else {
          (editor.submit_state().is_in_flight(), failure, "Loading")
        }
      }
    };

    if busy {
      (busy_text.to_string(), false)
    } else if let Some(message) = failure {
      (message.to_string(), true)
    } else {
      (self.status_msg.clone(), false)
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::List(_) => self.handle_list_key(key),
      Screen::Create(_) | Screen::Edit(_) => {
        self.handle_form_key(key);
        true
      }
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    let Screen::List(lister) = &mut self.screen else {
      return true;
    };

    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < lister.records().len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Screens
      KeyCode::Char('a') => self.open_create(),
      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(id) = lister.records().get(self.list_cursor).map(|r| r.id.clone()) {
          self.open_edit(id);
        }
      }
      KeyCode::Char('r') => self.open_list(),

      // Delete
      KeyCode::Char('d') => {
        let Some(id) = lister.records().get(self.list_cursor).map(|r| r.id.clone()) else {
          return true;
        };
        if lister.begin_delete(&id) {
          self.status_msg.clear();
          let client = self.client.clone();
          dispatch(&self.tx, self.generation, lister.lifetime(), async move {
            let result = client.delete(&id).await;
            Outcome::Deleted(id, result)
          });
        }
      }

      _ => {}
    }
    true
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.open_list(),
      KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
      KeyCode::Enter => self.submit(),
      KeyCode::Backspace => {
        if let Some(text) = self.focused_text() {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(text) = self.focused_text() {
          text.push(c);
        }
      }
      _ => {}
    }
  }

  /// The focused form field, unless the form is still waiting for its
  /// initial read.
  fn focused_text(&mut self) -> Option<&mut String> {
    match &mut self.screen {
      Screen::Create(creator) => Some(creator.field_mut(self.focus)),
      Screen::Edit(editor) if editor.load_state().is_succeeded() => {
        Some(editor.field_mut(self.focus))
      }
      _ => None,
    }
  }

  fn submit(&mut self) {
    let client = self.client.clone();
    let result = match &mut self.screen {
      Screen::Create(creator) => creator.begin_submit().map(|draft| {
        dispatch(&self.tx, self.generation, creator.lifetime(), async move {
          Outcome::Created(client.create(&draft).await)
        });
      }),
      Screen::Edit(editor) => {
        let id = editor.id().clone();
        editor.begin_submit().map(|body| {
          dispatch(&self.tx, self.generation, editor.lifetime(), async move {
            Outcome::Updated(client.update(&id, &body).await)
          });
        })
      }
      Screen::List(_) => Ok(()),
    };

    match result {
      Ok(()) => self.status_msg.clear(),
      Err(Error::Validation(report)) => {
        if let Some((field, _)) = report.errors().next() {
          self.focus = field;
        }
        self.status_msg = report.to_string();
      }
      Err(e) => debug!(error = %e, "submit not started"),
    }
  }
}
