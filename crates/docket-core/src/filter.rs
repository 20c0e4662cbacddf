//! Filter Engine — subscription and free-text views over the collection.
//!
//! Filters never mutate their input and always preserve its order; both the
//! calendar and flat search views are built from the same pass so student and
//! teacher views can never disagree about what matches.

use std::collections::BTreeSet;

use crate::{assessment::Assessment, normalize::Normalization};

/// Parameters for [`apply`].
///
/// `subjects` is a student's subject-subscription set (session-scoped, never
/// persisted); `text` is a free-text query over subject labels. Unset or
/// effectively-empty fields filter nothing.
#[derive(Debug, Clone, Default)]
pub struct AssessmentQuery {
  /// Keep only assessments whose subject is a member (exact match after
  /// normalization).
  pub subjects: Option<BTreeSet<String>>,
  /// Keep only assessments whose subject contains this as a
  /// case-insensitive substring.
  pub text:     Option<String>,
}

impl AssessmentQuery {
  pub fn is_empty(&self) -> bool {
    self.subjects.is_none() && self.text.is_none()
  }
}

/// Apply `query` to `assessments`, returning a new sequence in the input
/// order. Both filters combine with AND; a query with neither set returns
/// the input unchanged in content and order.
pub fn apply(
  assessments: &[Assessment],
  query: &AssessmentQuery,
  normalization: Normalization,
) -> Vec<Assessment> {
  // Normalize the subscription set once; members that normalize to nothing
  // cannot match anything and are dropped.
  let subjects: Option<BTreeSet<String>> =
    query.subjects.as_ref().and_then(|set| {
      let keys: BTreeSet<String> = set
        .iter()
        .map(|s| normalization.key(s))
        .filter(|k| !k.is_empty())
        .collect();
      (!keys.is_empty()).then_some(keys)
    });

  let needle: Option<String> = query
    .text
    .as_deref()
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_lowercase);

  assessments
    .iter()
    .filter(|a| {
      if let Some(keys) = &subjects
        && !keys.contains(&normalization.key(&a.subject))
      {
        return false;
      }
      if let Some(needle) = &needle
        && !a.subject.to_lowercase().contains(needle.as_str())
      {
        return false;
      }
      true
    })
    .cloned()
    .collect()
}
