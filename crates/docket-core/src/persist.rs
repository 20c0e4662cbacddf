//! Persistence seams consumed by store implementations.
//!
//! The snapshot adapter treats the whole collection as one structured
//! document — file-backed today, swappable for an embedded database without
//! touching the uniqueness/ordering logic that sits above it. The blob store
//! holds rubric images; the core never looks inside them.

use std::future::Future;

use crate::{
  Result,
  assessment::{Assessment, RubricImageRef},
};

/// Loads and saves the full assessment collection as a single document.
///
/// Adapters hold no reference used for mutation — they only serialize and
/// deserialize a snapshot on demand. Retry policy, if any, belongs here, not
/// in the store: the store surfaces the first failure immediately.
pub trait SnapshotPersistence: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The persisted collection; the empty collection when no prior data
  /// exists.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Vec<Assessment>, Self::Error>> + Send + '_;

  /// Replace the persisted document with `assessments`. Must round-trip
  /// every field losslessly (dates to the day, image refs verbatim).
  fn save<'a>(
    &'a self,
    assessments: &'a [Assessment],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// Opaque storage for rubric images.
pub trait BlobStore: Send + Sync {
  /// Store raw image bytes and return the reference to record on an
  /// assessment.
  fn store<'a>(
    &'a self,
    bytes: &'a [u8],
    media_type: &'a str,
  ) -> impl Future<Output = Result<RubricImageRef>> + Send + 'a;

  /// The raw bytes behind a reference.
  ///
  /// Fails with [`Error::RubricImageNotFound`](crate::Error) when the blob
  /// is gone.
  fn retrieve<'a>(
    &'a self,
    image: &'a RubricImageRef,
  ) -> impl Future<Output = Result<Vec<u8>>> + Send + 'a;
}
