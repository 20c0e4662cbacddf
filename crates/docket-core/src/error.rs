//! Error types for `docket-core`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The normalized `(subject, date)` pair already has an assessment.
  #[error("an assessment for {subject:?} on {date} already exists")]
  DuplicateAssessment { subject: String, date: NaiveDate },

  #[error("assessment not found: {0}")]
  NotFound(Uuid),

  #[error("rubric image not found: {0}")]
  RubricImageNotFound(String),

  #[error("subject must not be empty")]
  EmptySubject,

  #[error("unauthorized")]
  Unauthorized,

  /// Storage I/O failure, surfaced unmodified from the persistence adapter.
  /// The in-memory collection is rolled back before this is returned.
  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box any adapter error into the [`Error::Persistence`] variant.
  pub fn persistence<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Persistence(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
