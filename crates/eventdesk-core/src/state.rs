//! Per-operation transient state.

/// Where a single remote operation stands.
///
/// One value per operation replaces separate loading/error/success flags, so
/// "loading and succeeded at once" cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpState {
  #[default]
  Idle,
  InFlight,
  Succeeded,
  /// Carries the user-facing message for the failure category.
  Failed(String),
}

impl OpState {
  /// Move to `InFlight`. Returns `false`, leaving the state untouched, if a
  /// call is already outstanding.
  pub fn begin(&mut self) -> bool {
    if self.is_in_flight() {
      return false;
    }
    *self = Self::InFlight;
    true
  }

  pub fn succeed(&mut self) { *self = Self::Succeeded; }

  pub fn fail(&mut self, message: impl Into<String>) {
    *self = Self::Failed(message.into());
  }

  pub fn is_in_flight(&self) -> bool { matches!(self, Self::InFlight) }

  pub fn is_succeeded(&self) -> bool { matches!(self, Self::Succeeded) }

  pub fn error(&self) -> Option<&str> {
    match self {
      Self::Failed(m) => Some(m),
      _ => None,
    }
  }
}
