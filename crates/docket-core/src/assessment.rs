//! Assessment — the sole persisted entity.
//!
//! An assessment is a scheduled graded task for one subject due on one date,
//! optionally carrying a rubric image. Records are immutable once created;
//! the only mutations are insertion and permanent removal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a rubric image held in a blob store.
///
/// The core never interprets image bytes; this is an opaque handle that the
/// blob store understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricImageRef {
  /// Path relative to the blob store's root directory.
  pub path:         String,
  /// SHA-256 hex digest; identical uploads share a blob.
  pub content_hash: String,
  pub media_type:   String,
}

/// A scheduled performance-assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
  pub id:           Uuid,
  /// Non-empty after trimming. Stored with its original casing; uniqueness
  /// comparisons go through [`crate::normalize::Normalization`].
  pub subject:      String,
  /// Due date, no time component. Past dates are kept as history.
  pub date:         NaiveDate,
  pub rubric_image: Option<RubricImageRef>,
  /// Server-assigned timestamp; never changes after creation. Tiebreaker for
  /// the deterministic list order.
  pub created_at:   DateTime<Utc>,
}

impl Assessment {
  /// Key for the canonical list order: `date` ascending, then `created_at`
  /// ascending. The id breaks `created_at` ties so the order stays total.
  pub fn list_key(&self) -> (NaiveDate, DateTime<Utc>, Uuid) {
    (self.date, self.created_at, self.id)
  }
}

/// Input to [`crate::store::AssessmentStore::add`].
/// `id` and `created_at` are always set by the store; they are not accepted
/// from callers.
#[derive(Debug, Clone)]
pub struct NewAssessment {
  pub subject:      String,
  pub date:         NaiveDate,
  pub rubric_image: Option<RubricImageRef>,
}

impl NewAssessment {
  /// Convenience constructor for an assessment without a rubric image.
  pub fn new(subject: impl Into<String>, date: NaiveDate) -> Self {
    Self {
      subject: subject.into(),
      date,
      rubric_image: None,
    }
  }
}
