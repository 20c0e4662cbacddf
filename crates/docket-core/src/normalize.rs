//! Subject normalization for uniqueness and subscription matching.
//!
//! Two assessments collide when their subjects are the same label, not the
//! same bytes: `" Math "` and `"math"` both name the one Math class. How far
//! that folding goes is configurable — classrooms taking input through CJK
//! IMEs also want full-width variants (`"ＭＡＴＨ"`) treated as the ASCII
//! label, while Latin-only deployments can skip the extra pass.

use serde::{Deserialize, Serialize};

/// The folding rule applied before subjects are compared.
///
/// Selected once at store construction and injected everywhere comparisons
/// happen; never switched at runtime (the persisted data has no normalized
/// form — keys are always recomputed).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
  /// Trim surrounding whitespace, then Unicode-lowercase.
  #[default]
  CaseFold,
  /// [`CaseFold`](Self::CaseFold), plus folding full-width ASCII variants
  /// (U+FF01..U+FF5E) and the ideographic space to their ASCII forms.
  CaseAndWidthFold,
}

impl Normalization {
  /// The comparison key for a subject label.
  ///
  /// An empty key means the subject was effectively empty and must be
  /// rejected by the store.
  pub fn key(self, subject: &str) -> String {
    match self {
      Self::CaseFold => subject.trim().to_lowercase(),
      Self::CaseAndWidthFold => {
        let folded: String = subject.chars().map(fold_width).collect();
        folded.trim().to_lowercase()
      }
    }
  }
}

/// Map a full-width ASCII variant to its half-width form; everything else
/// passes through unchanged.
fn fold_width(c: char) -> char {
  match c {
    // Ideographic space folds to a plain space so trimming catches it.
    '\u{3000}' => ' ',
    '\u{FF01}'..='\u{FF5E}' => {
      char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
    }
    _ => c,
  }
}
