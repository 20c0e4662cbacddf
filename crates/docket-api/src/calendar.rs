//! Handler for `GET /api/calendar`.
//!
//! The month view is recomputed from the live collection on every request —
//! there is no cached index to invalidate. Filters apply before grouping, so
//! a subscribed student's calendar only lights up their own subjects.

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use docket_core::{
  assessment::Assessment,
  calendar::month_view,
  filter::{self, AssessmentQuery},
  persist::BlobStore,
  store::AssessmentStore,
};

use crate::{AppState, error::ApiError, subject_set};

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
  pub year:     i32,
  pub month:    u32,
  /// Comma-separated subscription set, e.g. `Math,Science`.
  pub subjects: Option<String>,
  /// Free-text subject query.
  pub q:        Option<String>,
}

/// `GET /api/calendar?year=<y>&month=<m>[&subjects=a,b][&q=text]`
///
/// Returns day-of-month → assessments due that day; days with nothing due
/// are absent from the map.
pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  Query(params): Query<CalendarParams>,
) -> Result<Json<BTreeMap<u32, Vec<Assessment>>>, ApiError>
where
  S: AssessmentStore + 'static,
  B: BlobStore + 'static,
{
  // Delegate month validity to the date type rather than range-checking.
  if NaiveDate::from_ymd_opt(params.year, params.month, 1).is_none() {
    return Err(ApiError::BadRequest(format!(
      "invalid month: {}-{:02}",
      params.year, params.month
    )));
  }

  let query = AssessmentQuery {
    subjects: subject_set(params.subjects.as_deref()),
    text:     params.q,
  };

  let all = state.store.list_all().await?;
  let filtered = filter::apply(&all, &query, state.normalization);
  Ok(Json(month_view(&filtered, params.year, params.month)))
}
