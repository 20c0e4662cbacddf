//! Role Gate — the teacher/student authorization check.
//!
//! There is no session store: every mutating request supplies the shared
//! teacher code and is validated independently. The gate holds the secret as
//! process-wide configuration, set once at startup and never mutated.

use crate::{Error, Result};

/// The documented default teacher code; deployments override it via
/// configuration (`teacher_code` / `DOCKET_TEACHER_CODE`).
pub const DEFAULT_TEACHER_CODE: &str = "teacher123";

/// Zero-size proof of authorization: holding one means a submitted code
/// matched the configured secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teacher;

/// Validates submitted codes against the configured teacher secret.
#[derive(Clone)]
pub struct RoleGate {
  secret: String,
}

impl RoleGate {
  pub fn new(secret: impl Into<String>) -> Self {
    Self { secret: secret.into() }
  }

  /// Exact string comparison; no hashing, no lockout, no backoff.
  pub fn authorize(&self, submitted_code: &str) -> Result<Teacher> {
    if submitted_code == self.secret {
      Ok(Teacher)
    } else {
      Err(Error::Unauthorized)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn correct_code_grants_teacher() {
    let gate = RoleGate::new("teacher123");
    assert!(gate.authorize("teacher123").is_ok());
  }

  #[test]
  fn wrong_code_is_unauthorized() {
    let gate = RoleGate::new("teacher123");
    assert!(matches!(gate.authorize("teacher124"), Err(Error::Unauthorized)));
    assert!(matches!(gate.authorize(""), Err(Error::Unauthorized)));
  }

  #[test]
  fn comparison_is_exact_not_normalized() {
    let gate = RoleGate::new("teacher123");
    assert!(matches!(
      gate.authorize(" teacher123"),
      Err(Error::Unauthorized)
    ));
    assert!(matches!(
      gate.authorize("TEACHER123"),
      Err(Error::Unauthorized)
    ));
  }
}
