//! Handler for `GET /api/search`.
//!
//! Flat, date-ordered results — the calendar endpoint serves the grouped
//! view. Both run the same filter pass, so they can never disagree.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use docket_core::{
  assessment::Assessment,
  filter::{self, AssessmentQuery},
  persist::BlobStore,
  store::AssessmentStore,
};

use crate::{AppState, error::ApiError, subject_set};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free-text filter over subject labels.
  pub q:        Option<String>,
  /// Comma-separated subscription set; results must be members.
  pub subjects: Option<String>,
}

/// `GET /api/search[?q=text][&subjects=a,b]`
pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Assessment>>, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  let query = AssessmentQuery {
    subjects: subject_set(params.subjects.as_deref()),
    text:     params.q,
  };

  let all = state.store.list_all().await?;
  Ok(Json(filter::apply(&all, &query, state.normalization)))
}
