//! The `AssessmentStore` trait.
//!
//! Implemented by storage backends (e.g. `docket-store-json`). Higher layers
//! (`docket-api`) depend on this abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  assessment::{Assessment, NewAssessment},
};

/// Abstraction over the shared assessment collection.
///
/// Implementations must uphold the store's two invariants:
///
/// - at most one assessment per normalized `(subject, date)` pair, enforced
///   atomically with the write — two concurrent `add`s can never both pass
///   the uniqueness check;
/// - every successful mutation is flushed to durable storage before it
///   returns, and a failed flush leaves the in-memory collection untouched.
pub trait AssessmentStore: Send + Sync {
  /// Create and persist a new assessment. The store assigns `id` and
  /// `created_at` and trims the subject.
  ///
  /// Fails with [`Error::DuplicateAssessment`](crate::Error) when the
  /// normalized `(subject, date)` pair is taken, and with
  /// [`Error::EmptySubject`](crate::Error) when the subject trims to
  /// nothing.
  fn add(
    &self,
    input: NewAssessment,
  ) -> impl Future<Output = Result<Assessment>> + Send + '_;

  /// Permanently delete an assessment. There is no soft delete and ids are
  /// never reused.
  ///
  /// Fails with [`Error::NotFound`](crate::Error) for an unknown id.
  fn remove(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send + '_;

  /// Retrieve one assessment by id.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Assessment>> + Send + '_;

  /// The full collection, ordered by `date` ascending then `created_at`
  /// ascending. Stable and deterministic — calendar rendering and tests
  /// rely on it.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Assessment>>> + Send + '_;
}
